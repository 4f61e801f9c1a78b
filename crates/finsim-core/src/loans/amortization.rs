//! Level-installment (French) amortization.
//!
//! Computes the fixed monthly installment for a principal, rate and term, and
//! the full period-by-period schedule of interest, principal and remaining
//! balance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::build_schedule;
use crate::error::FinsimError;
use crate::time_value::{level_payment, product};
use crate::types::{with_metadata, AmortizationRow, ComputationOutput, Money, Rate, RateBasis};
use crate::FinsimResult;

/// Annual rates above this trigger a warning.
const HIGH_ANNUAL_RATE: Decimal = dec!(0.30);

/// Terms longer than this (in months) trigger a warning.
const LONG_TERM_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan parameters shared by the loan calculators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Interest rate as a decimal, quoted on `rate_basis`.
    pub rate: Rate,
    /// Whether `rate` is a nominal annual or a monthly rate.
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// Number of monthly installments.
    pub term_months: u32,
}

impl LoanInput {
    pub fn monthly_rate(&self) -> Rate {
        self.rate_basis.monthly_rate(self.rate)
    }
}

/// Result of a standard amortization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub installment: Money,
    pub monthly_rate: Rate,
    /// installment * term - principal.
    pub total_interest: Money,
    /// installment * term.
    pub total_paid: Money,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the fixed installment and amortization schedule of a loan.
pub fn compute_amortization(
    input: &LoanInput,
) -> FinsimResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    validate_loan(input)?;

    log::debug!(
        "amortization: principal={} rate={} basis={:?} term={}",
        input.principal,
        input.rate,
        input.rate_basis,
        input.term_months
    );

    let monthly_rate = input.monthly_rate();
    let installment = level_payment(input.principal, monthly_rate, input.term_months)?;
    let warnings = loan_warnings(input)?;
    let schedule = build_schedule(
        input.principal,
        monthly_rate,
        installment,
        input.term_months,
        1,
    );

    let total_paid = product(installment, Decimal::from(input.term_months), "total paid")?;
    let output = AmortizationOutput {
        installment,
        monthly_rate,
        total_interest: total_paid - input.principal,
        total_paid,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-installment amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate_loan(input: &LoanInput) -> FinsimResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.rate <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "rate".into(),
            reason: "Interest rate must be positive".into(),
        });
    }
    if input.term_months == 0 {
        return Err(FinsimError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    Ok(())
}

pub(crate) fn loan_warnings(input: &LoanInput) -> FinsimResult<Vec<String>> {
    let mut warnings = Vec::new();
    let annual = product(input.monthly_rate(), dec!(12), "annualised rate")?;
    if annual > HIGH_ANNUAL_RATE {
        warnings.push(format!(
            "Annualised rate {annual} is unusually high; check the rate basis"
        ));
    }
    if input.term_months > LONG_TERM_MONTHS {
        warnings.push(format!(
            "Term of {} months exceeds 50 years",
            input.term_months
        ));
    }
    Ok(warnings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_loan() -> LoanInput {
        LoanInput {
            principal: dec!(10000),
            rate: dec!(0.05),
            rate_basis: RateBasis::Annual,
            term_months: 12,
        }
    }

    #[test]
    fn test_installment_and_totals() {
        let out = compute_amortization(&standard_loan()).unwrap().result;
        assert_close(out.installment, dec!(856.07), TOL, "installment");
        assert_close(out.total_interest, dec!(272.90), TOL, "total interest");
        // Figure shown when the installment is rounded for display first.
        assert_eq!(out.installment.round_dp(2) * dec!(12) - dec!(10000), dec!(272.84));
        assert_eq!(out.total_paid, out.installment * dec!(12));
        assert_eq!(out.total_paid, dec!(10000) + out.total_interest);
    }

    #[test]
    fn test_schedule_shape() {
        let out = compute_amortization(&standard_loan()).unwrap().result;
        assert_eq!(out.schedule.len(), 12);
        for (i, row) in out.schedule.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
            assert_eq!(row.principal, row.installment - row.interest);
        }
        assert_close(out.schedule[0].interest, dec!(41.67), TOL, "first interest");
        assert_close(out.schedule[11].balance, Decimal::ZERO, TOL, "final balance");
    }

    #[test]
    fn test_balance_non_increasing() {
        let out = compute_amortization(&standard_loan()).unwrap().result;
        let mut prev = dec!(10000);
        for row in &out.schedule {
            assert!(row.balance <= prev);
            assert!(row.balance >= Decimal::ZERO);
            prev = row.balance;
        }
    }

    #[test]
    fn test_monthly_basis_uses_rate_directly() {
        let mut input = standard_loan();
        input.rate = dec!(0.01);
        input.rate_basis = RateBasis::Monthly;
        let out = compute_amortization(&input).unwrap().result;
        assert_eq!(out.monthly_rate, dec!(0.01));
        // 10,000 at 1%/month over 12 months = 888.49
        assert_close(out.installment, dec!(888.49), TOL, "installment");
    }

    #[test]
    fn test_high_rate_warning() {
        let mut input = standard_loan();
        input.rate = dec!(0.05);
        input.rate_basis = RateBasis::Monthly;
        let out = compute_amortization(&input).unwrap();
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_huge_monthly_rate_overflows_cleanly() {
        let input = LoanInput {
            principal: dec!(1000),
            rate: dec!(10000000000000000000000000000),
            rate_basis: RateBasis::Monthly,
            term_months: 1,
        };
        let err = compute_amortization(&input).unwrap_err();
        assert!(matches!(err, FinsimError::Overflow { .. }));
    }

    #[test]
    fn test_validation_zero_principal() {
        let mut input = standard_loan();
        input.principal = Decimal::ZERO;
        let err = compute_amortization(&input).unwrap_err();
        match err {
            FinsimError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_validation_negative_rate() {
        let mut input = standard_loan();
        input.rate = dec!(-0.01);
        assert!(compute_amortization(&input).is_err());
    }

    #[test]
    fn test_validation_zero_term() {
        let mut input = standard_loan();
        input.term_months = 0;
        assert!(compute_amortization(&input).is_err());
    }

    #[test]
    fn test_metadata_populated() {
        let out = compute_amortization(&standard_loan()).unwrap();
        assert_eq!(out.methodology, "Level-installment amortization");
        assert!(!out.metadata.version.is_empty());
        assert_eq!(out.assumptions["term_months"], 12);
    }
}
