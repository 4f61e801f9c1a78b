use serde_json::Value;

use super::cell;

/// Headline field of each command, in lookup order.
const HEADLINE_KEYS: [&str; 10] = [
    "installment",
    "post_grace_installment",
    "original_installment",
    "required_monthly_deposit",
    "future_value",
    "monthly_payment",
    "projected_amount",
    "total_days",
    "converted_amount",
    "gain",
];

/// Print only the headline figure of a result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", headline(result));
}

fn headline(result: &Value) -> String {
    let Value::Object(map) = result else {
        return cell(result);
    };

    for key in HEADLINE_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return cell(val);
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| format!("{key}: {}", cell(val)))
        .unwrap_or_default()
}
