use clap::Args;
use rust_decimal::Decimal;

use finsim_core::savings::goal::{self, SavingsGoalInput};
use finsim_core::savings::investment::{self, InvestmentInput};

use super::{emit, resolve, CommandResult, CompoundingArg, HorizonUnitArg, RateBasisArg};

#[derive(Args)]
pub struct SavingsGoalArgs {
    /// Amount to accumulate
    #[arg(long, alias = "target")]
    pub target_amount: Option<Decimal>,

    /// Annual interest rate as a decimal
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Saving horizon in years (fractional allowed)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// How the monthly rate is derived from the annual rate
    #[arg(long, value_enum, default_value = "annual")]
    pub compounding: CompoundingArg,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Args)]
pub struct InvestmentArgs {
    /// Initial lump sum
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Interest rate as a decimal, quoted on --rate-basis
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Length of the investment, in --horizon-unit
    #[arg(long)]
    pub horizon: Option<u32>,

    #[arg(long, value_enum, default_value = "years")]
    pub horizon_unit: HorizonUnitArg,

    /// Yearly contribution, spread monthly when iterating by month
    #[arg(long, default_value = "0")]
    pub annual_contribution: Decimal,

    #[arg(long, value_enum, default_value = "annual")]
    pub rate_basis: RateBasisArg,

    /// Omit the period-by-period schedule
    #[arg(long)]
    pub no_schedule: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings_goal(args: SavingsGoalArgs) -> CommandResult {
    let goal_input: SavingsGoalInput = resolve(args.input.as_deref(), || {
        Ok(SavingsGoalInput {
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding: args.compounding.into(),
        })
    })?;
    emit(goal::compute_savings_goal(&goal_input))
}

pub fn run_investment(args: InvestmentArgs) -> CommandResult {
    let inv_input: InvestmentInput = resolve(args.input.as_deref(), || {
        Ok(InvestmentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            horizon: args
                .horizon
                .ok_or("--horizon is required (or provide --input)")?,
            horizon_unit: args.horizon_unit.into(),
            annual_contribution: args.annual_contribution,
            rate_basis: args.rate_basis.into(),
            include_schedule: !args.no_schedule,
        })
    })?;
    emit(investment::compute_investment_growth(&inv_input))
}
