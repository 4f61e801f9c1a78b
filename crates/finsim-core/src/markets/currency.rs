use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinsimResult;

/// Conversion of an amount at a quoted exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConversionInput {
    pub amount: Money,
    /// ISO code of the source currency.
    pub from: String,
    /// ISO code of the target currency.
    pub to: String,
    /// Units of `to` per unit of `from`, as quoted by the rate provider.
    pub exchange_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConversionOutput {
    pub converted_amount: Money,
    pub exchange_rate: Decimal,
    /// Units of `from` per unit of `to`.
    pub inverse_rate: Decimal,
}

/// Convert `amount` from one currency to another at a caller-supplied rate.
pub fn convert_currency(
    input: &CurrencyConversionInput,
) -> FinsimResult<ComputationOutput<CurrencyConversionOutput>> {
    let start = Instant::now();

    if input.amount < Decimal::ZERO {
        return Err(FinsimError::invalid("amount", "Amount cannot be negative"));
    }
    if input.exchange_rate <= Decimal::ZERO {
        return Err(FinsimError::invalid(
            "exchange_rate",
            "Exchange rate must be positive",
        ));
    }
    for (field, code) in [("from", &input.from), ("to", &input.to)] {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FinsimError::InvalidInput {
                field: field.into(),
                reason: format!("'{code}' is not a three-letter currency code"),
            });
        }
    }

    let mut warnings = Vec::new();
    if input.from.eq_ignore_ascii_case(&input.to) && input.exchange_rate != Decimal::ONE {
        warnings.push(format!(
            "Same-currency conversion quoted at {} instead of 1",
            input.exchange_rate
        ));
    }

    let converted_amount = input
        .amount
        .checked_mul(input.exchange_rate)
        .ok_or_else(|| FinsimError::overflow("currency conversion"))?;

    let output = CurrencyConversionOutput {
        converted_amount,
        exchange_rate: input.exchange_rate,
        inverse_rate: Decimal::ONE / input.exchange_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!(
            "Currency conversion {} -> {}",
            input.from.to_uppercase(),
            input.to.to_uppercase()
        ),
        input,
        warnings,
        elapsed,
        output,
    ))
}
