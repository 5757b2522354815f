use serde_json::Value;

use super::{format_cell, result_of};

/// Headline figures, in order of priority, across every command's result.
const PRIORITY_KEYS: [&str; 7] = [
    "monthlyCashFlow",
    "cashOnCashReturn",
    "grossProfit",
    "total",
    "monthlyPayment",
    "roi",
    "netYield",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known headline fields first, then falls back to the
/// first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(result_of(value)));
}

fn minimal_line(result: &Value) -> String {
    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return format_cell(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_cell(val));
        }
    }
    format_cell(result)
}
