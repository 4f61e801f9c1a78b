pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::OutputFormat;

/// Dispatch output to the selected formatter, rounding first if asked.
pub fn format_output(format: &OutputFormat, value: &Value, precision: Option<u32>) {
    let rounded;
    let value = match precision {
        Some(dp) => {
            rounded = round_decimals(value, dp);
            &rounded
        }
        None => value,
    };

    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Round every decimal string in the document to `dp` places.
///
/// Decimals serialise as strings, so integers, dates and labels pass through
/// untouched. Metadata is left alone.
pub fn round_decimals(value: &Value, dp: u32) -> Value {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => Value::String(d.round_dp(dp).to_string()),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| round_decimals(v, dp)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if k == "metadata" {
                        v.clone()
                    } else {
                        round_decimals(v, dp)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Render a scalar JSON value as a plain cell.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
