use clap::Args;
use rust_decimal::Decimal;

use finsim_core::loans::amortization::{self, LoanInput};
use finsim_core::loans::grace_period::{self, GracePeriodInput};
use finsim_core::loans::prepayment::{self, PrepaymentInput};

use super::{emit, resolve, CommandResult, RateBasisArg};

/// Loan terms shared by the amortization and grace-period commands.
#[derive(Args)]
pub struct LoanTermsArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Interest rate as a decimal (0.05 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Whether --rate is a nominal annual or a monthly rate
    #[arg(long, value_enum, default_value = "annual")]
    pub rate_basis: RateBasisArg,

    /// Number of monthly installments
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,
}

impl LoanTermsArgs {
    fn to_input(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        Ok(LoanInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            rate_basis: self.rate_basis.into(),
            term_months: self
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        })
    }
}

#[derive(Args)]
pub struct AmortizationArgs {
    #[command(flatten)]
    pub loan: LoanTermsArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct GracePeriodArgs {
    #[command(flatten)]
    pub loan: LoanTermsArgs,

    /// Leading interest-only months
    #[arg(long)]
    pub grace_months: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct PrepaymentArgs {
    /// Principal outstanding before the prepayment
    #[arg(long)]
    pub remaining_principal: Option<Decimal>,

    /// Interest rate as a decimal
    #[arg(long)]
    pub rate: Option<Decimal>,

    #[arg(long, value_enum, default_value = "annual")]
    pub rate_basis: RateBasisArg,

    /// Installments still due
    #[arg(long)]
    pub remaining_term_months: Option<u32>,

    /// Lump sum repaid now
    #[arg(long, alias = "amount")]
    pub prepayment_amount: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortization(args: AmortizationArgs) -> CommandResult {
    let loan: LoanInput = resolve(args.input.as_deref(), || args.loan.to_input())?;
    emit(amortization::compute_amortization(&loan))
}

pub fn run_grace_period(args: GracePeriodArgs) -> CommandResult {
    let grace_input: GracePeriodInput = resolve(args.input.as_deref(), || {
        Ok(GracePeriodInput {
            loan: args.loan.to_input()?,
            grace_months: args
                .grace_months
                .ok_or("--grace-months is required (or provide --input)")?,
        })
    })?;
    emit(grace_period::compute_grace_period(&grace_input))
}

pub fn run_prepayment(args: PrepaymentArgs) -> CommandResult {
    let pp_input: PrepaymentInput = resolve(args.input.as_deref(), || {
        Ok(PrepaymentInput {
            remaining_principal: args
                .remaining_principal
                .ok_or("--remaining-principal is required (or provide --input)")?,
            rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            rate_basis: args.rate_basis.into(),
            remaining_term_months: args
                .remaining_term_months
                .ok_or("--remaining-term-months is required (or provide --input)")?,
            prepayment_amount: args
                .prepayment_amount
                .ok_or("--prepayment-amount is required (or provide --input)")?,
        })
    })?;
    emit(prepayment::compute_prepayment(&pp_input))
}
