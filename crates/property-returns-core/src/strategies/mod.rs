pub mod brr;
pub mod btl;
pub mod flip;
pub mod hmo;
pub mod rental;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PropertyReturnsError;
use crate::time_value::MAX_TERM_YEARS;
use crate::types::{Money, Percent};
use crate::PropertyReturnsResult;

pub(crate) fn require_non_negative(field: &str, value: Money) -> PropertyReturnsResult<()> {
    if value < Decimal::ZERO {
        return Err(PropertyReturnsError::invalid(field, "Must not be negative"));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Money) -> PropertyReturnsResult<()> {
    if value <= Decimal::ZERO {
        return Err(PropertyReturnsError::invalid(field, "Must be greater than zero"));
    }
    Ok(())
}

/// Mortgage terms in whole years, capped so the amortisation cannot overflow.
pub(crate) fn require_term(field: &str, years: u32) -> PropertyReturnsResult<()> {
    if years == 0 || years > MAX_TERM_YEARS {
        return Err(PropertyReturnsError::invalid(
            field,
            format!("Mortgage term must be between 1 and {MAX_TERM_YEARS} years"),
        ));
    }
    Ok(())
}

/// Percent fields live on the 0–100 scale.
pub(crate) fn require_percent(field: &str, value: Percent) -> PropertyReturnsResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(PropertyReturnsError::invalid(field, "Must be between 0 and 100"));
    }
    Ok(())
}

pub(crate) fn percent_of(amount: Money, percent: Percent) -> Money {
    amount * percent / dec!(100)
}
