use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::cell;

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table. Each array of rows (schedules,
/// projections) gets its own table, and nested objects such as the two
/// prepayment outcomes are printed as titled sections.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_section(None, result);
                print_notes(map);
            }
            _ => print_section(None, map),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{value}"),
    }
}

fn print_section(title: Option<&str>, map: &Map<String, Value>) {
    if let Some(title) = title {
        println!("\n{title}");
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if !is_structured(val) {
            builder.push_record([key.as_str(), &cell(val)]);
        }
    }
    println!("{}", Table::from(builder));

    for (key, val) in map {
        match val {
            Value::Object(inner) => print_section(Some(&heading(key)), inner),
            Value::Array(rows) if !rows.is_empty() => {
                println!("\n{}", heading(key));
                print_rows(rows);
            }
            _ => {}
        }
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", cell(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| heading(h)));
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_)) || matches!(value, Value::Array(a) if !a.is_empty())
}

/// `reduced_term` -> `Reduced term`.
fn heading(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading() {
        assert_eq!(heading("reduced_term"), "Reduced term");
        assert_eq!(heading("schedule"), "Schedule");
        assert_eq!(heading(""), "");
    }

    #[test]
    fn test_is_structured() {
        assert!(is_structured(&json!({"a": 1})));
        assert!(is_structured(&json!([{"period": 1}])));
        assert!(!is_structured(&json!([])));
        assert!(!is_structured(&json!("856.07")));
    }
}
