use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values (GBP in practice, no currency conversion is applied).
pub type Money = Decimal;

/// Percentages on the 0–100 scale (5.5 = 5.5%). Never fractions.
pub type Percent = Decimal;

/// A percentage ratio whose denominator may legitimately be zero or negative.
///
/// Used instead of letting an infinite or undefined value leak into
/// downstream arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Finite(Decimal),
    /// Unbounded return: nothing (or less than nothing) left invested.
    Infinite,
    /// Zero denominator with no business meaning.
    Undefined,
}

impl Ratio {
    /// `numerator / denominator × 100`, or `Undefined` for a zero denominator.
    pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Ratio {
        if denominator.is_zero() {
            Ratio::Undefined
        } else {
            Ratio::Finite(numerator / denominator * dec!(100))
        }
    }

    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Ratio::Finite(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Ratio::Infinite)
    }
}

/// Round half away from zero, matching how the UI rounds currency.
pub fn round_money(value: Money, dp: u32) -> Money {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
