//! Fixed-installment loans: standard amortization, grace periods and early
//! repayment.

pub mod amortization;
pub mod grace_period;
pub mod prepayment;

use rust_decimal::Decimal;

use crate::types::{AmortizationRow, Money, Rate};

/// Build `periods` rows of a level-installment schedule starting from
/// `principal`, numbering the first row `first_period`.
///
/// Interest accrues on the running balance; the displayed balance is clamped
/// at zero to hide sub-cent drift on the final row.
pub(crate) fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    installment: Money,
    periods: u32,
    first_period: u32,
) -> Vec<AmortizationRow> {
    let mut balance = principal;
    let mut schedule = Vec::new();

    for i in 0..periods {
        let interest = balance * monthly_rate;
        let principal_part = installment - interest;
        balance -= principal_part;

        schedule.push(AmortizationRow {
            period: first_period + i,
            installment,
            interest,
            principal: principal_part,
            balance: balance.max(Decimal::ZERO),
        });
    }

    schedule
}

/// Sum of the interest column.
pub(crate) fn total_interest(schedule: &[AmortizationRow]) -> Money {
    schedule.iter().map(|row| row.interest).sum()
}
