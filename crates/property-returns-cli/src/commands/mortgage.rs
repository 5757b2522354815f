use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use property_returns_core::time_value::{annual_debt_service, compute_amortized_payment};
use property_returns_core::types::{with_metadata, Money};

use super::{money_arg, percent_arg};

/// Arguments for a repayment mortgage quote
#[derive(Args)]
pub struct MortgagePaymentArgs {
    /// Loan amount, e.g. 187500 or "£187,500"
    #[arg(long, value_parser = money_arg)]
    pub principal: Decimal,

    /// Annual interest rate in percent, e.g. 5.5
    #[arg(long, value_parser = percent_arg)]
    pub rate: Decimal,

    /// Term in years
    #[arg(long, default_value = "25")]
    pub term: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MortgageQuote {
    monthly_payment: Money,
    annual_debt_service: Money,
    total_repaid: Money,
    total_interest: Money,
}

pub fn run_mortgage_payment(
    args: MortgagePaymentArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let monthly_payment = compute_amortized_payment(args.principal, args.rate, args.term)?;
    let total_repaid = annual_debt_service(monthly_payment) * Decimal::from(args.term);

    let quote = MortgageQuote {
        monthly_payment,
        annual_debt_service: annual_debt_service(monthly_payment),
        total_repaid,
        total_interest: total_repaid - args.principal,
    };

    let output = with_metadata(
        "Fixed-Rate Repayment Mortgage (Monthly Amortisation)",
        &serde_json::json!({
            "principal": args.principal,
            "annualRatePercent": args.rate,
            "termYears": args.term,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        quote,
    );
    Ok(serde_json::to_value(output)?)
}
