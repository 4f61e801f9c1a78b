use serde_json::{Map, Value};
use std::io;

use super::cell;

/// Write output as CSV to stdout.
///
/// A result carrying schedules or projections is written one row per period.
/// When there is more than one such table (the two prepayment outcomes) a
/// leading `section` column names the table each row belongs to. Anything
/// else becomes `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let written = write_result(&mut wtr, result).and_then(|_| wtr.flush().map_err(csv::Error::from));
    if let Err(e) = written {
        log::error!("failed to write CSV: {e}");
    }
}

fn write_result<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    match result {
        Value::Object(map) => {
            let mut tables = Vec::new();
            collect_row_arrays("", map, &mut tables);
            match tables.as_slice() {
                [] => write_fields(wtr, map),
                [(_, rows)] => write_rows(wtr, None, rows),
                _ => write_sections(wtr, &tables),
            }
        }
        Value::Array(rows) => write_rows(wtr, None, rows),
        other => wtr.write_record([cell(other)]),
    }
}

/// Every array of objects in the result, keyed by its dotted path.
fn collect_row_arrays<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    out: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                out.push((path, rows));
            }
            Value::Object(inner) => collect_row_arrays(&path, inner, out),
            _ => {}
        }
    }
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &cell(val)])?;
    }
    Ok(())
}

fn headers_of(rows: &[Value]) -> Vec<&str> {
    match rows.first() {
        Some(Value::Object(first)) => first.keys().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

fn write_rows<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    section: Option<&str>,
    rows: &[Value],
) -> csv::Result<()> {
    let headers = headers_of(rows);
    if section.is_none() {
        wtr.write_record(&headers)?;
    }
    for row in rows {
        if let Value::Object(map) = row {
            let mut record: Vec<String> = section.map(str::to_string).into_iter().collect();
            record.extend(
                headers
                    .iter()
                    .map(|h| map.get(*h).map(cell).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }
    }
    Ok(())
}

fn write_sections<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    tables: &[(String, &[Value])],
) -> csv::Result<()> {
    let Some((_, first)) = tables.first() else {
        return Ok(());
    };
    let mut header = vec!["section"];
    header.extend(headers_of(first));
    wtr.write_record(&header)?;

    for (path, rows) in tables {
        write_rows(wtr, Some(path.as_str()), rows)?;
    }
    Ok(())
}
