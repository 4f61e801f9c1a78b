use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::types::{with_metadata, ComputationOutput};
use crate::FinsimResult;

/// Average year length used to split the remaining days.
const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Average month length used to split the remaining days.
const DAYS_PER_MONTH: Decimal = dec!(30.44);

/// Time left until a statutory retirement age is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownInput {
    pub birth_date: NaiveDate,
    pub retirement_age_years: u32,
    #[serde(default)]
    pub retirement_age_months: u32,
    /// Reference date the countdown is measured from.
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownOutput {
    pub retirement_date: NaiveDate,
    pub total_days: i64,
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Compute the retirement date and the years, months and days left until it.
pub fn compute_retirement_countdown(
    input: &CountdownInput,
) -> FinsimResult<ComputationOutput<CountdownOutput>> {
    let start = Instant::now();

    if input.retirement_age_years == 0 && input.retirement_age_months == 0 {
        return Err(FinsimError::InvalidInput {
            field: "retirement_age_years".into(),
            reason: "Retirement age must be positive".into(),
        });
    }
    if input.retirement_age_months >= 12 {
        return Err(FinsimError::InvalidInput {
            field: "retirement_age_months".into(),
            reason: "Months component must be between 0 and 11".into(),
        });
    }

    let total_months = input
        .retirement_age_years
        .checked_mul(12)
        .and_then(|m| m.checked_add(input.retirement_age_months))
        .ok_or_else(|| FinsimError::DateError("Retirement age out of range".into()))?;
    let retirement_date = input
        .birth_date
        .checked_add_months(Months::new(total_months))
        .ok_or_else(|| FinsimError::DateError("Retirement date out of range".into()))?;

    if retirement_date <= input.as_of {
        return Err(FinsimError::InvalidInput {
            field: "retirement_age_years".into(),
            reason: format!(
                "Retirement date {retirement_date} must be after {}",
                input.as_of
            ),
        });
    }

    log::debug!(
        "retirement countdown: born {} retiring {} as of {}",
        input.birth_date,
        retirement_date,
        input.as_of
    );

    let total_days = (retirement_date - input.as_of).num_days();
    let days_dec = Decimal::from(total_days);

    let years = (days_dec / DAYS_PER_YEAR).floor();
    let after_years = days_dec - years * DAYS_PER_YEAR;
    let months = (after_years / DAYS_PER_MONTH).floor();
    let days = (after_years - months * DAYS_PER_MONTH).floor();

    let to_u32 = |d: Decimal| {
        d.to_u32()
            .ok_or_else(|| FinsimError::DateError("Countdown component out of range".into()))
    };

    let output = CountdownOutput {
        retirement_date,
        total_days,
        years: to_u32(years)?,
        months: to_u32(months)?,
        days: to_u32(days)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Calendar countdown (365.25-day years, 30.44-day months)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_retirement_date_adds_years_and_months() {
        let input = CountdownInput {
            birth_date: date(1970, 3, 15),
            retirement_age_years: 66,
            retirement_age_months: 6,
            as_of: date(2026, 1, 1),
        };
        let out = compute_retirement_countdown(&input).unwrap().result;
        assert_eq!(out.retirement_date, date(2036, 9, 15));
        assert_eq!(out.total_days, (date(2036, 9, 15) - date(2026, 1, 1)).num_days());
    }

    #[test]
    fn test_decomposition() {
        let input = CountdownInput {
            birth_date: date(1960, 1, 1),
            retirement_age_years: 67,
            retirement_age_months: 0,
            as_of: date(2025, 1, 1),
        };
        let out = compute_retirement_countdown(&input).unwrap().result;
        // 730 days: 1 year (365.25), 364.75 left = 11 months (334.84), 29 days.
        assert_eq!(out.total_days, 730);
        assert_eq!(out.years, 1);
        assert_eq!(out.months, 11);
        assert_eq!(out.days, 29);
    }

    #[test]
    fn test_past_retirement_rejected() {
        let input = CountdownInput {
            birth_date: date(1950, 1, 1),
            retirement_age_years: 65,
            retirement_age_months: 0,
            as_of: date(2025, 1, 1),
        };
        assert!(compute_retirement_countdown(&input).is_err());
    }

    #[test]
    fn test_month_component_validated() {
        let input = CountdownInput {
            birth_date: date(1990, 1, 1),
            retirement_age_years: 65,
            retirement_age_months: 12,
            as_of: date(2025, 1, 1),
        };
        assert!(compute_retirement_countdown(&input).is_err());
    }
}
