//! Time-value primitives shared by every calculator: compound factors, the
//! level-payment (annuity) formula, the future-value annuity factor and the
//! monthly equivalent of an annual rate. All math in `rust_decimal::Decimal`,
//! with overflow surfaced as `FinsimError::Overflow`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinsimError;
use crate::types::{Money, Rate};
use crate::FinsimResult;

const ROOT_TOLERANCE: Decimal = dec!(0.0000000000001);
const MAX_ROOT_ITERATIONS: u32 = 40;

/// `a * b`, with overflow reported against `context`.
pub(crate) fn product(a: Decimal, b: Decimal, context: &str) -> FinsimResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| FinsimError::overflow(context))
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> FinsimResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinsimError::overflow("compound factor"))?;
    }
    Ok(result)
}

/// (1 + r)^n for a possibly fractional number of periods.
///
/// Whole exponents go through [`compound`]; fractional ones fall back to
/// `checked_powd`.
pub fn compound_fractional(rate: Rate, n: Decimal) -> FinsimResult<Decimal> {
    if n.fract().is_zero() {
        if let Some(whole) = n.to_u32() {
            return compound(rate, whole);
        }
    }
    (Decimal::ONE + rate)
        .checked_powd(n)
        .ok_or_else(|| FinsimError::overflow("fractional compound factor"))
}

/// Fixed installment that amortizes `principal` over `n` periods at `rate`.
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), with the limiting value P / n
/// when the rate (or the denominator) is zero.
pub fn level_payment(principal: Money, rate: Rate, n: u32) -> FinsimResult<Money> {
    if n == 0 {
        return Err(FinsimError::invalid(
            "term",
            "Number of periods must be > 0",
        ));
    }

    let n_dec = Decimal::from(n);
    if rate.is_zero() {
        return Ok(principal / n_dec);
    }

    let factor = compound(rate, n)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Ok(principal / n_dec);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| FinsimError::overflow("level payment"))
}

/// Future value of one unit deposited at the end of each of `n` periods:
/// ((1 + r)^n - 1) / r, or n when r is zero.
pub fn annuity_fv_factor(rate: Rate, n: Decimal) -> FinsimResult<Decimal> {
    if rate.is_zero() {
        return Ok(n);
    }
    let factor = compound_fractional(rate, n)?;
    (factor - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(|| FinsimError::overflow("annuity future-value factor"))
}

/// Effective monthly rate equivalent to an annual rate: (1 + r)^(1/12) - 1.
pub fn effective_monthly_rate(annual_rate: Rate) -> Rate {
    nth_root(Decimal::ONE + annual_rate, 12) - Decimal::ONE
}

/// Compute the nth root of x using Newton's method.
pub fn nth_root(x: Decimal, n: u32) -> Decimal {
    if x == Decimal::ONE || x.is_zero() {
        return x;
    }
    if n == 0 {
        return Decimal::ONE;
    }
    if n == 1 {
        return x;
    }

    let n_dec = Decimal::from(n);
    let mut guess = Decimal::ONE;

    for _ in 0..MAX_ROOT_ITERATIONS {
        let mut g_n_minus_1 = Decimal::ONE;
        for _ in 0..n - 1 {
            g_n_minus_1 *= guess;
        }
        if g_n_minus_1.is_zero() {
            break;
        }
        let g_n = g_n_minus_1 * guess;

        let delta = (g_n - x) / (n_dec * g_n_minus_1);
        guess -= delta;

        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    guess
}
