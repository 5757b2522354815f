use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PropertyReturnsError;
use crate::types::{round_money, Money, Percent};
use crate::PropertyReturnsResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Longest mortgage term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 50;

/// Fixed-rate repayment mortgage payment per month, rounded to pence.
///
/// `payment = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and
/// `n` the number of monthly payments. A zero rate amortises straight-line.
pub fn compute_amortized_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> PropertyReturnsResult<Money> {
    if term_years == 0 || term_years > MAX_TERM_YEARS {
        return Err(PropertyReturnsError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Mortgage term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }
    if principal < Decimal::ZERO {
        return Err(PropertyReturnsError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(PropertyReturnsError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let total_months = term_years * MONTHS_PER_YEAR;
    let monthly_rate = annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR);

    if monthly_rate.is_zero() {
        return Ok(round_money(principal / Decimal::from(total_months), 2));
    }

    let overflow = || PropertyReturnsError::InvalidInput {
        field: "annual_rate_percent".into(),
        reason: format!(
            "{annual_rate_percent}% over {term_years} years overflows the payment calculation"
        ),
    };

    // (1 + r)^n via iterative multiplication
    let growth = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = compound.checked_mul(growth).ok_or_else(overflow)?;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PropertyReturnsError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    let payment = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(overflow)?;

    Ok(round_money(payment, 2))
}

/// Twelve monthly payments.
pub fn annual_debt_service(monthly_payment: Money) -> Money {
    monthly_payment * Decimal::from(MONTHS_PER_YEAR)
}
