use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinsimResult;

/// Single-sum growth of current savings until retirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: Money,
    pub annual_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementYear {
    pub age: u32,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub years_to_retirement: u32,
    /// current_savings * (1 + r)^(retirement_age - current_age).
    pub projected_amount: Money,
    /// One row per age from current_age to retirement_age inclusive.
    pub yearly_projection: Vec<RetirementYear>,
}

/// Project savings compounded annually up to the retirement age.
pub fn compute_retirement_projection(
    input: &RetirementInput,
) -> FinsimResult<ComputationOutput<RetirementOutput>> {
    let start = Instant::now();
    validate(input)?;

    log::debug!(
        "retirement projection: age {}..{} savings={} rate={}",
        input.current_age,
        input.retirement_age,
        input.current_savings,
        input.annual_rate
    );

    let mut warnings: Vec<String> = Vec::new();
    if input.current_savings.is_zero() {
        warnings.push("Current savings are zero; the projection stays flat".to_string());
    }

    let years = input.retirement_age - input.current_age;
    let growth = Decimal::ONE + input.annual_rate;
    let mut balance = input.current_savings;
    let mut yearly_projection = vec![RetirementYear {
        age: input.current_age,
        balance,
    }];
    for age in input.current_age + 1..=input.retirement_age {
        balance = balance
            .checked_mul(growth)
            .ok_or_else(|| FinsimError::overflow("retirement projection"))?;
        yearly_projection.push(RetirementYear { age, balance });
    }

    let projected_amount = yearly_projection
        .last()
        .map(|row| row.balance)
        .unwrap_or(input.current_savings);

    let output = RetirementOutput {
        years_to_retirement: years,
        projected_amount,
        yearly_projection,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual compound growth to retirement age",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &RetirementInput) -> FinsimResult<()> {
    if input.current_age == 0 {
        return Err(FinsimError::InvalidInput {
            field: "current_age".into(),
            reason: "Current age must be positive".into(),
        });
    }
    if input.retirement_age <= input.current_age {
        return Err(FinsimError::InvalidInput {
            field: "retirement_age".into(),
            reason: "Retirement age must be greater than current age".into(),
        });
    }
    if input.current_savings < Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "current_savings".into(),
            reason: "Current savings cannot be negative".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}
