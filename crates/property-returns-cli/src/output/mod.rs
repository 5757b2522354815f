pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted `field`/`value` rows.
///
/// Ratio sentinels (`{"kind": "finite", "value": ...}`) collapse to a single
/// cell so they read as a number, `inf` or `n/a`.
pub fn flatten_rows(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into("", value, &mut rows);
    rows
}

fn flatten_into(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if ratio_cell(value).is_none() => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&path, val, rows);
            }
        }
        _ => rows.push((prefix.to_string(), format_cell(value))),
    }
}

fn ratio_cell(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    match map.get("kind")?.as_str()? {
        "finite" => map.get("value").map(format_cell),
        "infinite" => Some("inf".into()),
        "undefined" => Some("n/a".into()),
        _ => None,
    }
}

pub fn format_cell(value: &Value) -> String {
    if let Some(cell) = ratio_cell(value) {
        return cell;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
