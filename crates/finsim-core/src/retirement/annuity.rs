use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::time_value::{level_payment, product};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinsimResult;

/// Immediate annuity: a capital converted into level monthly payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityInput {
    pub capital: Money,
    pub annual_rate: Rate,
    pub payout_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityOutput {
    pub monthly_payment: Money,
    pub total_paid_out: Money,
    /// Paid out in excess of the capital.
    pub total_interest: Money,
}

/// Level monthly payment that exhausts `capital` over `payout_months`.
pub fn compute_immediate_annuity(
    input: &AnnuityInput,
) -> FinsimResult<ComputationOutput<AnnuityOutput>> {
    let start = Instant::now();

    if input.capital <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "capital".into(),
            reason: "Capital must be positive".into(),
        });
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate must be positive".into(),
        });
    }
    if input.payout_months == 0 {
        return Err(FinsimError::InvalidInput {
            field: "payout_months".into(),
            reason: "Payout period must be at least one month".into(),
        });
    }

    log::debug!(
        "immediate annuity: capital={} rate={} months={}",
        input.capital,
        input.annual_rate,
        input.payout_months
    );

    let monthly_payment =
        level_payment(input.capital, input.annual_rate / dec!(12), input.payout_months)?;
    let total_paid_out = product(
        monthly_payment,
        Decimal::from(input.payout_months),
        "total paid out",
    )?;

    let output = AnnuityOutput {
        monthly_payment,
        total_paid_out,
        total_interest: total_paid_out - input.capital,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Immediate annuity (level-payment formula)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_known_value() {
        let input = AnnuityInput {
            capital: dec!(100000),
            annual_rate: dec!(0.05),
            payout_months: 120,
        };
        let out = compute_immediate_annuity(&input).unwrap().result;
        // 100,000 at 5%/12 over 120 months = 1,060.66
        assert_eq!(out.monthly_payment.round_dp(2), dec!(1060.66));
        assert_eq!(out.total_paid_out, out.monthly_payment * dec!(120));
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_validation() {
        let mut input = AnnuityInput {
            capital: dec!(100000),
            annual_rate: dec!(0.05),
            payout_months: 0,
        };
        assert!(compute_immediate_annuity(&input).is_err());
        input.payout_months = 12;
        input.capital = dec!(-5);
        assert!(compute_immediate_annuity(&input).is_err());
    }
}
