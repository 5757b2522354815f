pub mod mortgage;
pub mod strategies;
pub mod tax;

use rust_decimal::Decimal;

use property_returns_core::parse;

/// clap value parser for currency-formatted amounts.
pub fn money_arg(s: &str) -> Result<Decimal, String> {
    parse::parse_money(s).map_err(|e| e.to_string())
}

/// clap value parser for 0–100 percentages.
pub fn percent_arg(s: &str) -> Result<Decimal, String> {
    parse::parse_percent(s).map_err(|e| e.to_string())
}
