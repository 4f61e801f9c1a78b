use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinsimError;
use crate::time_value::product;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinsimResult;

/// Gain on a stock position valued at a caller-supplied closing price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityReturnInput {
    pub symbol: String,
    pub quantity: u32,
    pub purchase_price: Money,
    /// Latest close from the quote provider.
    pub current_price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityReturnOutput {
    pub invested: Money,
    pub current_value: Money,
    /// current_value - invested; negative for a loss.
    pub gain: Money,
    /// gain / invested as a decimal.
    pub return_rate: Rate,
}

pub fn compute_equity_return(
    input: &EquityReturnInput,
) -> FinsimResult<ComputationOutput<EquityReturnOutput>> {
    let start = Instant::now();

    if input.symbol.trim().is_empty() {
        return Err(FinsimError::invalid("symbol", "Ticker symbol is required"));
    }
    if input.quantity == 0 {
        return Err(FinsimError::invalid("quantity", "Quantity must be positive"));
    }
    if input.purchase_price <= Decimal::ZERO {
        return Err(FinsimError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }
    if input.current_price < Decimal::ZERO {
        return Err(FinsimError::invalid(
            "current_price",
            "Current price cannot be negative",
        ));
    }

    let qty = Decimal::from(input.quantity);
    let invested = product(qty, input.purchase_price, "invested amount")?;
    let current_value = product(qty, input.current_price, "current value")?;
    let gain = current_value - invested;

    let mut warnings = Vec::new();
    if gain < -invested * dec!(0.5) {
        warnings.push(format!("{} has lost more than half its value", input.symbol));
    }

    let output = EquityReturnOutput {
        invested,
        current_value,
        gain,
        return_rate: gain / invested,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Holding-period return on a stock position",
        input,
        warnings,
        elapsed,
        output,
    ))
}
