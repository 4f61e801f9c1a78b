//! Loans with an initial interest-only grace period.
//!
//! During the grace window only interest is paid and the principal is left
//! untouched; afterwards the full principal amortizes over the remaining
//! months.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{loan_warnings, validate_loan, LoanInput};
use super::{build_schedule, total_interest};
use crate::error::FinsimError;
use crate::time_value::{level_payment, product};
use crate::types::{with_metadata, AmortizationRow, ComputationOutput, Money};
use crate::FinsimResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GracePeriodInput {
    #[serde(flatten)]
    pub loan: LoanInput,
    /// Leading months during which only interest is paid.
    pub grace_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GracePeriodOutput {
    /// Installment during the grace window (principal * monthly rate).
    pub interest_only_installment: Money,
    /// Installment once amortization starts.
    pub post_grace_installment: Money,
    pub amortizing_months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    /// Full-term schedule: grace rows first, then the amortizing rows.
    pub schedule: Vec<AmortizationRow>,
}

/// Compute the grace-period and post-grace installments and the combined
/// schedule.
pub fn compute_grace_period(
    input: &GracePeriodInput,
) -> FinsimResult<ComputationOutput<GracePeriodOutput>> {
    let start = Instant::now();
    validate_loan(&input.loan)?;
    if input.grace_months >= input.loan.term_months {
        return Err(FinsimError::InvalidInput {
            field: "grace_months".into(),
            reason: "Grace period must be shorter than the loan term".into(),
        });
    }

    log::debug!(
        "grace period: principal={} term={} grace={}",
        input.loan.principal,
        input.loan.term_months,
        input.grace_months
    );

    let loan = &input.loan;
    let monthly_rate = loan.monthly_rate();
    let amortizing_months = loan.term_months - input.grace_months;

    let interest_only = product(loan.principal, monthly_rate, "interest-only installment")?;
    let post_grace = level_payment(loan.principal, monthly_rate, amortizing_months)?;
    let mut warnings = loan_warnings(loan)?;

    let mut schedule = Vec::new();
    for period in 1..=input.grace_months {
        schedule.push(AmortizationRow {
            period,
            installment: interest_only,
            interest: interest_only,
            principal: Decimal::ZERO,
            balance: loan.principal,
        });
    }
    schedule.extend(build_schedule(
        loan.principal,
        monthly_rate,
        post_grace,
        amortizing_months,
        input.grace_months + 1,
    ));

    if input.grace_months * 2 > loan.term_months {
        warnings.push(format!(
            "Grace period covers {} of {} months; most of the term pays no principal",
            input.grace_months, loan.term_months
        ));
    }

    let total_paid = product(interest_only, Decimal::from(input.grace_months), "grace payments")?
        .checked_add(product(
            post_grace,
            Decimal::from(amortizing_months),
            "amortizing payments",
        )?)
        .ok_or_else(|| FinsimError::overflow("total paid"))?;

    let output = GracePeriodOutput {
        interest_only_installment: interest_only,
        post_grace_installment: post_grace,
        amortizing_months,
        total_interest: total_interest(&schedule),
        total_paid,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Interest-only grace period followed by level-installment amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}
