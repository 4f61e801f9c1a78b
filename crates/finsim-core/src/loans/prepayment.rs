//! Early (partial) repayment of an outstanding loan.
//!
//! A lump sum reduces the outstanding principal, and the borrower chooses
//! between two outcomes, both computed here from the same reduced principal:
//!
//! - **Reduced installment**: the remaining term is kept and the installment
//!   is recomputed on the reduced principal.
//! - **Reduced term**: the original installment is kept and the loan is paid
//!   off in fewer months.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{build_schedule, total_interest};
use crate::error::FinsimError;
use crate::time_value::{level_payment, product};
use crate::types::{with_metadata, AmortizationRow, ComputationOutput, Money, Rate, RateBasis};
use crate::FinsimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    /// Principal still outstanding before the prepayment.
    pub remaining_principal: Money,
    pub rate: Rate,
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// Installments still due under the current plan.
    pub remaining_term_months: u32,
    /// Lump sum repaid now; 0 < amount <= remaining_principal.
    pub prepayment_amount: Money,
}

/// Keep the term, lower the installment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReducedInstallment {
    pub new_installment: Money,
    /// original installment - new installment.
    pub installment_reduction: Money,
    /// installment_reduction * remaining term.
    pub total_savings: Money,
    /// total_savings net of the prepaid amount.
    pub interest_savings: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// Keep the installment, shorten the term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReducedTerm {
    pub installment: Money,
    pub new_term_months: u32,
    pub periods_saved: u32,
    pub total_interest: Money,
    /// Interest of the original plan minus interest of the shortened plan.
    pub interest_savings: Money,
    pub schedule: Vec<AmortizationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentOutput {
    pub original_installment: Money,
    pub original_total_interest: Money,
    pub reduced_principal: Money,
    pub reduced_installment: ReducedInstallment,
    pub reduced_term: ReducedTerm,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the reduced-installment and reduced-term outcomes of a prepayment.
pub fn compute_prepayment(
    input: &PrepaymentInput,
) -> FinsimResult<ComputationOutput<PrepaymentOutput>> {
    let start = Instant::now();
    validate_prepayment(input)?;

    log::debug!(
        "prepayment: remaining={} term={} prepay={}",
        input.remaining_principal,
        input.remaining_term_months,
        input.prepayment_amount
    );

    let mut warnings: Vec<String> = Vec::new();
    let monthly_rate = input.rate_basis.monthly_rate(input.rate);
    let term = input.remaining_term_months;

    let original_installment = level_payment(input.remaining_principal, monthly_rate, term)?;
    let original_total_interest =
        product(original_installment, Decimal::from(term), "original payments")?
            - input.remaining_principal;
    let reduced_principal = input.remaining_principal - input.prepayment_amount;
    let settled = reduced_principal <= Decimal::ZERO;

    // Both outcomes need the fixed installment to out-run the interest.
    let first_interest = product(reduced_principal, monthly_rate, "first-period interest")?;
    if !settled && original_installment <= first_interest {
        return Err(FinsimError::NonAmortizingInstallment {
            installment: original_installment,
            interest: first_interest,
        });
    }

    if settled {
        warnings.push("Prepayment settles the loan in full".to_string());
    }

    let reduced_installment = if settled {
        settled_installment(original_installment, input.prepayment_amount, term)?
    } else {
        compute_reduced_installment(
            original_installment,
            reduced_principal,
            monthly_rate,
            input.prepayment_amount,
            term,
        )?
    };
    let reduced_term = compute_reduced_term(
        original_installment,
        original_total_interest,
        reduced_principal,
        monthly_rate,
        term,
    )?;

    let output = PrepaymentOutput {
        original_installment,
        original_total_interest,
        reduced_principal,
        reduced_installment,
        reduced_term,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Early repayment: reduced installment vs reduced term",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

fn compute_reduced_installment(
    original_installment: Money,
    reduced_principal: Money,
    monthly_rate: Rate,
    prepayment_amount: Money,
    term: u32,
) -> FinsimResult<ReducedInstallment> {
    let new_installment = level_payment(reduced_principal, monthly_rate, term)?;
    let schedule = build_schedule(reduced_principal, monthly_rate, new_installment, term, 1);

    let installment_reduction = original_installment - new_installment;
    let total_savings = product(installment_reduction, Decimal::from(term), "installment savings")?;

    Ok(ReducedInstallment {
        new_installment,
        installment_reduction,
        total_savings,
        interest_savings: total_savings - prepayment_amount,
        total_interest: total_interest(&schedule),
        schedule,
    })
}

/// Nothing left to amortize: every remaining installment is saved.
fn settled_installment(
    original_installment: Money,
    prepayment_amount: Money,
    term: u32,
) -> FinsimResult<ReducedInstallment> {
    let total_savings = product(original_installment, Decimal::from(term), "installment savings")?;
    Ok(ReducedInstallment {
        new_installment: Decimal::ZERO,
        installment_reduction: original_installment,
        total_savings,
        interest_savings: total_savings - prepayment_amount,
        total_interest: Decimal::ZERO,
        schedule: Vec::new(),
    })
}

fn compute_reduced_term(
    installment: Money,
    original_total_interest: Money,
    reduced_principal: Money,
    monthly_rate: Rate,
    original_term: u32,
) -> FinsimResult<ReducedTerm> {
    // The plan can only get shorter; one spare iteration absorbs rounding.
    let max_iterations = original_term + 1;

    let mut balance = reduced_principal;
    let mut schedule: Vec<AmortizationRow> = Vec::new();

    while balance > Decimal::ZERO {
        if schedule.len() as u32 >= max_iterations {
            return Err(FinsimError::NonAmortizingInstallment {
                installment,
                interest: balance * monthly_rate,
            });
        }

        let interest = balance * monthly_rate;
        let principal = installment - interest;
        if principal <= Decimal::ZERO {
            return Err(FinsimError::NonAmortizingInstallment {
                installment,
                interest,
            });
        }
        balance -= principal;

        schedule.push(AmortizationRow {
            period: schedule.len() as u32 + 1,
            installment,
            interest,
            principal,
            balance: balance.max(Decimal::ZERO),
        });
    }

    let new_term = schedule.len() as u32;
    let interest = total_interest(&schedule);

    Ok(ReducedTerm {
        installment,
        new_term_months: new_term,
        periods_saved: original_term.saturating_sub(new_term),
        total_interest: interest,
        interest_savings: original_total_interest - interest,
        schedule,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_prepayment(input: &PrepaymentInput) -> FinsimResult<()> {
    if input.remaining_principal <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "remaining_principal".into(),
            reason: "Remaining principal must be positive".into(),
        });
    }
    if input.rate <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "rate".into(),
            reason: "Interest rate must be positive".into(),
        });
    }
    if input.remaining_term_months == 0 {
        return Err(FinsimError::InvalidInput {
            field: "remaining_term_months".into(),
            reason: "Remaining term must be at least one month".into(),
        });
    }
    if input.prepayment_amount <= Decimal::ZERO {
        return Err(FinsimError::InvalidInput {
            field: "prepayment_amount".into(),
            reason: "Prepayment must be positive".into(),
        });
    }
    if input.prepayment_amount > input.remaining_principal {
        return Err(FinsimError::InvalidInput {
            field: "prepayment_amount".into(),
            reason: "Prepayment cannot exceed the remaining principal".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_input() -> PrepaymentInput {
        PrepaymentInput {
            remaining_principal: dec!(100000),
            rate: dec!(0.025),
            rate_basis: RateBasis::Annual,
            remaining_term_months: 120,
            prepayment_amount: dec!(20000),
        }
    }

    fn run(input: &PrepaymentInput) -> PrepaymentOutput {
        compute_prepayment(input).unwrap().result
    }

    #[test]
    fn test_reduced_installment_lower() {
        let out = run(&standard_input());
        let ri = &out.reduced_installment;
        assert!(ri.new_installment < out.original_installment);
        assert_eq!(ri.schedule.len(), 120);
        // Installment is linear in principal: 80% of the original.
        let expected = out.original_installment * dec!(0.8);
        assert!((ri.new_installment - expected).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_reduced_installment_savings_identity() {
        let out = run(&standard_input());
        let ri = &out.reduced_installment;
        assert_eq!(
            ri.total_savings,
            (out.original_installment - ri.new_installment) * dec!(120)
        );
        assert_eq!(ri.interest_savings, ri.total_savings - dec!(20000));
        assert!(ri.interest_savings > Decimal::ZERO);
    }

    #[test]
    fn test_reduced_term_shorter() {
        let out = run(&standard_input());
        let rt = &out.reduced_term;
        assert!(rt.new_term_months < 120);
        assert_eq!(rt.schedule.len() as u32, rt.new_term_months);
        assert_eq!(rt.periods_saved, 120 - rt.new_term_months);
        assert_eq!(rt.installment, out.original_installment);
        assert_eq!(rt.schedule.last().unwrap().balance, Decimal::ZERO);
        assert!(rt.interest_savings > Decimal::ZERO);
    }

    #[test]
    fn test_reduced_term_rows_contiguous() {
        let out = run(&standard_input());
        for (i, row) in out.reduced_term.schedule.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
        }
    }

    #[test]
    fn test_full_prepayment_settles_loan() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(100000);
        let out = compute_prepayment(&input).unwrap();
        assert_eq!(out.result.reduced_term.new_term_months, 0);
        assert_eq!(out.result.reduced_installment.new_installment, Decimal::ZERO);
        assert!(out.result.reduced_installment.schedule.is_empty());
        assert!(!out.warnings.is_empty());
        assert_eq!(
            out.result.reduced_installment.total_savings,
            out.result.original_installment * dec!(120)
        );
    }

    #[test]
    fn test_sub_cent_remainder_keeps_outcomes_consistent() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(99999.995);
        let out = compute_prepayment(&input).unwrap();
        let rt = &out.result.reduced_term;
        let ri = &out.result.reduced_installment;
        assert_eq!(out.result.reduced_principal, dec!(0.005));
        // One installment clears what is left.
        assert_eq!(rt.new_term_months, 1);
        assert_eq!(rt.schedule.len(), 1);
        assert_eq!(ri.schedule.len(), 120);
        assert!(ri.new_installment > Decimal::ZERO);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_prepayment_exceeding_principal_rejected() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(100000.01);
        let err = compute_prepayment(&input).unwrap_err();
        assert!(matches!(err, FinsimError::InvalidInput { ref field, .. } if field == "prepayment_amount"));
    }

    #[test]
    fn test_zero_prepayment_rejected() {
        let mut input = standard_input();
        input.prepayment_amount = Decimal::ZERO;
        assert!(compute_prepayment(&input).is_err());
    }

    #[test]
    fn test_reduced_term_loop_detects_non_amortizing_installment() {
        // An installment equal to the period interest never reduces the balance.
        let err = compute_reduced_term(dec!(100), dec!(0), dec!(10000), dec!(0.01), 120)
            .unwrap_err();
        assert!(matches!(err, FinsimError::NonAmortizingInstallment { .. }));
    }

    #[test]
    fn test_reduced_term_loop_respects_iteration_cap() {
        // Amortizes, but far too slowly for the declared original term.
        let err = compute_reduced_term(dec!(101), dec!(0), dec!(10000), dec!(0.01), 12)
            .unwrap_err();
        assert!(matches!(err, FinsimError::NonAmortizingInstallment { .. }));
    }
}
