//! Compound growth of an investment with regular contributions.
//!
//! The period granularity depends on how the rate is quoted and on the unit
//! of the horizon:
//!
//! | rate basis | horizon | periods      | period rate | contribution |
//! |------------|---------|--------------|-------------|--------------|
//! | annual     | years   | horizon      | r           | c            |
//! | annual     | months  | horizon      | r / 12      | c / 12       |
//! | monthly    | years   | horizon * 12 | r           | c / 12       |
//! | monthly    | months  | horizon      | r           | c / 12       |
//!
//! `c` is always the yearly contribution.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::types::{with_metadata, ComputationOutput, HorizonUnit, Money, Rate, RateBasis};
use crate::FinsimResult;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Initial lump sum.
    pub principal: Money,
    pub annual_rate: Rate,
    pub horizon: u32,
    #[serde(default)]
    pub horizon_unit: HorizonUnit,
    /// Amount contributed per year, spread monthly when iterating by month.
    #[serde(default)]
    pub annual_contribution: Money,
    #[serde(default)]
    pub rate_basis: RateBasis,
    #[serde(default = "default_true")]
    pub include_schedule: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentPeriod {
    pub period: u32,
    pub balance: Money,
    pub period_yield: Money,
    pub cumulative_yield: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOutput {
    pub future_value: Money,
    pub total_contributed: Money,
    /// future_value - principal - total_contributed.
    pub total_interest_earned: Money,
    pub periods: u32,
    pub period_rate: Rate,
    pub period_contribution: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<InvestmentPeriod>>,
}

/// Project the future value of an investment period by period.
pub fn compute_investment_growth(
    input: &InvestmentInput,
) -> FinsimResult<ComputationOutput<InvestmentOutput>> {
    let start = Instant::now();
    validate(input)?;

    log::debug!(
        "investment: principal={} rate={} horizon={} {:?} basis={:?}",
        input.principal,
        input.annual_rate,
        input.horizon,
        input.horizon_unit,
        input.rate_basis
    );

    let mut warnings: Vec<String> = Vec::new();
    let twelve = dec!(12);
    let (periods, period_rate, period_contribution) = match (input.rate_basis, input.horizon_unit)
    {
        (RateBasis::Annual, HorizonUnit::Years) => {
            (input.horizon, input.annual_rate, input.annual_contribution)
        }
        (RateBasis::Annual, HorizonUnit::Months) => (
            input.horizon,
            input.annual_rate / twelve,
            input.annual_contribution / twelve,
        ),
        (RateBasis::Monthly, HorizonUnit::Years) => (
            input.horizon.checked_mul(12).ok_or_else(|| {
                FinsimError::invalid("horizon", "Horizon in months exceeds u32")
            })?,
            input.annual_rate,
            input.annual_contribution / twelve,
        ),
        (RateBasis::Monthly, HorizonUnit::Months) => (
            input.horizon,
            input.annual_rate,
            input.annual_contribution / twelve,
        ),
    };

    if input.rate_basis == RateBasis::Monthly && input.annual_rate > dec!(0.05) {
        warnings.push(format!(
            "Monthly rate {} compounds to more than 79% a year",
            input.annual_rate
        ));
    }

    let mut balance = input.principal;
    let mut cumulative_yield = Decimal::ZERO;
    let mut total_contributed = Decimal::ZERO;
    let mut schedule = input.include_schedule.then(Vec::new);

    for period in 1..=periods {
        let interest = balance
            .checked_mul(period_rate)
            .ok_or_else(|| FinsimError::overflow("investment interest"))?;
        balance = balance
            .checked_add(period_contribution + interest)
            .ok_or_else(|| FinsimError::overflow("investment balance"))?;
        cumulative_yield += interest;
        total_contributed += period_contribution;

        if let Some(rows) = schedule.as_mut() {
            rows.push(InvestmentPeriod {
                period,
                balance,
                period_yield: interest,
                cumulative_yield,
            });
        }
    }

    let output = InvestmentOutput {
        future_value: balance,
        total_contributed,
        total_interest_earned: balance - input.principal - total_contributed,
        periods,
        period_rate,
        period_contribution,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Periodic compound growth with contributions",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &InvestmentInput) -> FinsimResult<()> {
    if input.principal < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(FinsimError::invalid(
            "annual_rate",
            "Interest rate must be positive",
        ));
    }
    if input.horizon == 0 {
        return Err(FinsimError::invalid("horizon", "Horizon must be positive"));
    }
    if input.annual_contribution < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "annual_contribution",
            "Contribution cannot be negative",
        ));
    }
    Ok(())
}
