use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use property_returns_core::tax::stamp_duty;
use property_returns_core::types::with_metadata;

use super::money_arg;

/// Arguments for stamp duty
#[derive(Args)]
pub struct StampDutyArgs {
    /// Purchase price, e.g. 250000 or "£250,000"
    #[arg(long, value_parser = money_arg)]
    pub price: Decimal,

    /// Apply the 3% additional-property surcharge
    #[arg(long)]
    pub additional: bool,
}

pub fn run_stamp_duty(args: StampDutyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let breakdown = stamp_duty::transfer_tax_breakdown(args.price, args.additional)?;

    let mut warnings = Vec::new();
    if args.additional {
        warnings.push("Surcharge applied to the whole price".to_string());
    }

    let output = with_metadata(
        "SDLT Banded Marginal Calculation",
        &serde_json::json!({ "price": args.price, "additional": args.additional }),
        warnings,
        start.elapsed().as_micros() as u64,
        breakdown,
    );
    Ok(serde_json::to_value(output)?)
}
