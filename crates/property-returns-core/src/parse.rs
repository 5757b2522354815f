//! String-to-number coercion for form and command-line input, plus the
//! unrecognised-key check for structured input documents.
//!
//! Kept apart from the models so currency formatting never reaches the
//! arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::error::PropertyReturnsError;
use crate::types::{Money, Percent};
use crate::PropertyReturnsResult;

const CURRENCY_SYMBOLS: [char; 3] = ['£', '$', '€'];

/// Parse a currency-formatted amount such as `£250,000` or `1 200.50`.
///
/// Symbols, thousands separators and whitespace are stripped; a single
/// decimal point is kept. Negative amounts are rejected.
pub fn parse_money(input: &str) -> PropertyReturnsResult<Money> {
    let cleaned: String = input
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == ',' || CURRENCY_SYMBOLS.contains(c)))
        .collect();
    parse_cleaned(input, &cleaned)
}

/// Parse a percentage on the 0–100 scale, with or without a trailing `%`.
pub fn parse_percent(input: &str) -> PropertyReturnsResult<Percent> {
    let trimmed = input.trim();
    let cleaned = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value = parse_cleaned(input, cleaned)?;
    if value > dec!(100) {
        return Err(PropertyReturnsError::ParseError {
            input: input.into(),
            reason: "percentage must be between 0 and 100".into(),
        });
    }
    Ok(value)
}

fn parse_cleaned(input: &str, cleaned: &str) -> PropertyReturnsResult<Decimal> {
    let fail = |reason: &str| PropertyReturnsError::ParseError {
        input: input.into(),
        reason: reason.into(),
    };

    if cleaned.is_empty() {
        return Err(fail("no digits found"));
    }
    if cleaned.starts_with('-') {
        return Err(fail("negative amounts are not allowed"));
    }
    if cleaned.chars().filter(|c| *c == '.').count() > 1 {
        return Err(fail("more than one decimal point"));
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(fail("unexpected characters"));
    }
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(fail("no digits found"));
    }

    Decimal::from_str(cleaned).map_err(|e| fail(&e.to_string()))
}

/// Keys in `raw` that were dropped when it was deserialised into `parsed`.
///
/// `parsed` is serialised back and compared key by key, so this also covers
/// flattened structs where `deny_unknown_fields` is unavailable. Nested keys
/// are reported as dotted paths and keys set to `null` count as absent.
pub fn unknown_fields<T: Serialize>(raw: &Value, parsed: &T) -> PropertyReturnsResult<Vec<String>> {
    let known = serde_json::to_value(parsed)?;
    let mut unknown = Vec::new();
    collect_unknown(raw, &known, "", &mut unknown);
    Ok(unknown)
}

fn collect_unknown(raw: &Value, known: &Value, prefix: &str, out: &mut Vec<String>) {
    match (raw, known) {
        (Value::Object(raw), Value::Object(known)) => {
            for (key, value) in raw {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match known.get(key) {
                    Some(expected) => collect_unknown(value, expected, &path, out),
                    None if value.is_null() => {}
                    None => out.push(path),
                }
            }
        }
        (Value::Array(raw), Value::Array(known)) => {
            for (i, (item, expected)) in raw.iter().zip(known).enumerate() {
                collect_unknown(item, expected, &format!("{prefix}[{i}]"), out);
            }
        }
        _ => {}
    }
}
