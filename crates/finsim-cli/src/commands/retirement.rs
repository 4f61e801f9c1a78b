use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use finsim_core::retirement::annuity::{self, AnnuityInput};
use finsim_core::retirement::countdown::{self, CountdownInput};
use finsim_core::retirement::projection::{self, RetirementInput};

use super::{emit, resolve, CommandResult};

#[derive(Args)]
pub struct AnnuityArgs {
    /// Capital converted into payments
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Annual interest rate as a decimal
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, alias = "months")]
    pub payout_months: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct RetirementArgs {
    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Savings held today
    #[arg(long, alias = "savings")]
    pub current_savings: Option<Decimal>,

    /// Annual interest rate as a decimal
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct CountdownArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,

    /// Whole years of the retirement age
    #[arg(long, alias = "age")]
    pub retirement_age_years: Option<u32>,

    /// Extra months of the retirement age (0-11)
    #[arg(long, default_value_t = 0)]
    pub retirement_age_months: u32,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_annuity(args: AnnuityArgs) -> CommandResult {
    let annuity_input: AnnuityInput = resolve(args.input.as_deref(), || {
        Ok(AnnuityInput {
            capital: args.capital.ok_or("--capital is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            payout_months: args
                .payout_months
                .ok_or("--payout-months is required (or provide --input)")?,
        })
    })?;
    emit(annuity::compute_immediate_annuity(&annuity_input))
}

pub fn run_retirement(args: RetirementArgs) -> CommandResult {
    let ret_input: RetirementInput = resolve(args.input.as_deref(), || {
        Ok(RetirementInput {
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args
                .retirement_age
                .ok_or("--retirement-age is required (or provide --input)")?,
            current_savings: args
                .current_savings
                .ok_or("--current-savings is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
        })
    })?;
    emit(projection::compute_retirement_projection(&ret_input))
}

pub fn run_countdown(args: CountdownArgs) -> CommandResult {
    let countdown_input: CountdownInput = resolve(args.input.as_deref(), || {
        Ok(CountdownInput {
            birth_date: args
                .birth_date
                .ok_or("--birth-date is required (or provide --input)")?,
            retirement_age_years: args
                .retirement_age_years
                .ok_or("--retirement-age-years is required (or provide --input)")?,
            retirement_age_months: args.retirement_age_months,
            as_of: args
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        })
    })?;
    emit(countdown::compute_retirement_countdown(&countdown_input))
}
