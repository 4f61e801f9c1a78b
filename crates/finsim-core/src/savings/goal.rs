//! Monthly deposit needed to reach a savings goal.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::time_value::{annuity_fv_factor, effective_monthly_rate, product};
use crate::types::{with_metadata, Compounding, ComputationOutput, Money, Rate};
use crate::FinsimResult;

/// The yearly projection stops after this many years.
const MAX_PROJECTION_YEARS: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    pub target_amount: Money,
    pub annual_rate: Rate,
    /// Saving horizon in years; may be fractional.
    pub years: Decimal,
    #[serde(default)]
    pub compounding: Compounding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsYear {
    pub year: u32,
    /// deposit * 12 * year, before any interest.
    pub cumulative_deposits: Money,
    /// Deposits plus the interest they have earned by the end of the year.
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalOutput {
    pub required_monthly_deposit: Money,
    pub monthly_rate: Rate,
    pub total_months: Decimal,
    pub total_deposited: Money,
    pub interest_earned: Money,
    pub projection: Vec<SavingsYear>,
}

/// Compute the end-of-month deposit that grows to `target_amount`.
pub fn compute_savings_goal(
    input: &SavingsGoalInput,
) -> FinsimResult<ComputationOutput<SavingsGoalOutput>> {
    let start = Instant::now();
    validate(input)?;

    log::debug!(
        "savings goal: target={} rate={} years={} compounding={:?}",
        input.target_amount,
        input.annual_rate,
        input.years,
        input.compounding
    );

    let mut warnings: Vec<String> = Vec::new();
    let monthly_rate = match input.compounding {
        Compounding::Annual => effective_monthly_rate(input.annual_rate),
        Compounding::Monthly => input.annual_rate / dec!(12),
    };

    let total_months = product(input.years, dec!(12), "savings horizon in months")?;
    let factor = annuity_fv_factor(monthly_rate, total_months)?;
    let deposit = input
        .target_amount
        .checked_div(factor)
        .ok_or_else(|| FinsimError::overflow("required monthly deposit"))?;

    if !total_months.fract().is_zero() {
        warnings.push(format!(
            "Horizon of {} months is not a whole number of months",
            total_months
        ));
    }

    let projected_years = input
        .years
        .floor()
        .to_u32()
        .unwrap_or(MAX_PROJECTION_YEARS)
        .min(MAX_PROJECTION_YEARS);

    let mut projection = Vec::with_capacity(projected_years as usize);
    for year in 1..=projected_years {
        let months = Decimal::from(year * 12);
        let factor = annuity_fv_factor(monthly_rate, months)?;
        projection.push(SavingsYear {
            year,
            cumulative_deposits: product(deposit, months, "cumulative deposits")?,
            balance: product(deposit, factor, "projected balance")?,
        });
    }

    let total_deposited = product(deposit, total_months, "total deposited")?;
    let output = SavingsGoalOutput {
        required_monthly_deposit: deposit,
        monthly_rate,
        total_months,
        total_deposited,
        interest_earned: input.target_amount - total_deposited,
        projection,
    };

    let methodology = match input.compounding {
        Compounding::Annual => "Savings goal, effective monthly rate (1 + r)^(1/12) - 1",
        Compounding::Monthly => "Savings goal, nominal monthly rate r / 12",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

fn validate(input: &SavingsGoalInput) -> FinsimResult<()> {
    if input.target_amount <= Decimal::ZERO {
        return Err(FinsimError::invalid(
            "target_amount",
            "Target amount must be positive",
        ));
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(FinsimError::invalid(
            "annual_rate",
            "Interest rate must be positive",
        ));
    }
    if input.years <= Decimal::ZERO {
        return Err(FinsimError::invalid("years", "Horizon must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::compound;
    use rust_decimal_macros::dec;

    fn goal(compounding: Compounding) -> SavingsGoalInput {
        SavingsGoalInput {
            target_amount: dec!(10000),
            annual_rate: dec!(0.05),
            years: dec!(5),
            compounding,
        }
    }

    #[test]
    fn test_annual_compounding_uses_effective_rate() {
        let out = compute_savings_goal(&goal(Compounding::Annual)).unwrap().result;
        let grown = compound(out.monthly_rate, 12).unwrap();
        assert!((grown - dec!(1.05)).abs() < dec!(0.0000001));
        assert!(out.monthly_rate < dec!(0.05) / dec!(12));
    }

    #[test]
    fn test_conventions_differ() {
        let annual = compute_savings_goal(&goal(Compounding::Annual)).unwrap().result;
        let monthly = compute_savings_goal(&goal(Compounding::Monthly)).unwrap().result;
        assert_eq!(monthly.monthly_rate, dec!(0.05) / dec!(12));
        // A lower effective rate needs a larger deposit.
        assert!(annual.required_monthly_deposit > monthly.required_monthly_deposit);
    }

    #[test]
    fn test_deposit_reaches_target() {
        let out = compute_savings_goal(&goal(Compounding::Monthly)).unwrap().result;
        let fv = out.required_monthly_deposit
            * annuity_fv_factor(out.monthly_rate, dec!(60)).unwrap();
        assert!((fv - dec!(10000)).abs() < dec!(0.000001));
        // 10,000 over 60 months at 5%/12 needs ~147.05 a month.
        assert_eq!(out.required_monthly_deposit.round_dp(2), dec!(147.05));
    }

    #[test]
    fn test_projection_capped_at_ten_years() {
        let mut input = goal(Compounding::Annual);
        input.years = dec!(25);
        let out = compute_savings_goal(&input).unwrap().result;
        assert_eq!(out.projection.len(), 10);

        input.years = dec!(3.5);
        let out = compute_savings_goal(&input).unwrap().result;
        assert_eq!(out.projection.len(), 3);
    }

    #[test]
    fn test_projection_rows() {
        let out = compute_savings_goal(&goal(Compounding::Monthly)).unwrap().result;
        let d = out.required_monthly_deposit;
        assert_eq!(out.projection[0].cumulative_deposits, d * dec!(12));
        assert_eq!(out.projection[2].cumulative_deposits, d * dec!(36));
        let last = out.projection.last().unwrap();
        assert_eq!(last.year, 5);
        assert!((last.balance - dec!(10000)).abs() < dec!(0.000001));
        for row in &out.projection {
            assert!(row.balance >= row.cumulative_deposits);
        }
    }

    #[test]
    fn test_fractional_horizon_warns() {
        let mut input = goal(Compounding::Annual);
        input.years = dec!(2.51);
        let out = compute_savings_goal(&input).unwrap();
        assert!(!out.warnings.is_empty());
        assert!(out.result.required_monthly_deposit > Decimal::ZERO);
    }

    #[test]
    fn test_huge_horizon_overflows_cleanly() {
        let mut input = goal(Compounding::Monthly);
        input.years = dec!(70000000000000000000000000000);
        let err = compute_savings_goal(&input).unwrap_err();
        assert!(matches!(err, FinsimError::Overflow { .. }));
    }

    #[test]
    fn test_validation() {
        let mut input = goal(Compounding::Annual);
        input.target_amount = Decimal::ZERO;
        assert!(compute_savings_goal(&input).is_err());

        let mut input = goal(Compounding::Annual);
        input.annual_rate = Decimal::ZERO;
        assert!(compute_savings_goal(&input).is_err());

        let mut input = goal(Compounding::Annual);
        input.years = dec!(-1);
        assert!(compute_savings_goal(&input).is_err());
    }
}
