use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyReturnsError;
use crate::types::{round_money, Money, Percent};
use crate::PropertyReturnsResult;

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// One marginal band. `upper == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBand {
    pub lower: Money,
    pub upper: Option<Money>,
    pub rate: Percent,
}

/// Residential stamp duty bands (England & NI).
pub const STAMP_DUTY_BANDS: [TaxBand; 4] = [
    TaxBand {
        lower: dec!(0),
        upper: Some(dec!(250000)),
        rate: dec!(0),
    },
    TaxBand {
        lower: dec!(250000),
        upper: Some(dec!(925000)),
        rate: dec!(5),
    },
    TaxBand {
        lower: dec!(925000),
        upper: Some(dec!(1500000)),
        rate: dec!(10),
    },
    TaxBand {
        lower: dec!(1500000),
        upper: None,
        rate: dec!(12),
    },
];

/// Flat surcharge on the whole price for additional dwellings.
pub const ADDITIONAL_PROPERTY_SURCHARGE: Percent = dec!(3);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tax attributable to a single band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSlice {
    pub band: TaxBand,
    /// Portion of the price falling inside this band
    pub taxable_amount: Money,
    pub tax: Money,
}

/// Itemised transfer tax, for display alongside the headline figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxBreakdown {
    pub price: Money,
    pub is_additional_property: bool,
    pub slices: Vec<BandSlice>,
    /// Sum of the banded tax, unrounded
    pub band_tax: Money,
    /// Surcharge on the whole price (zero unless additional property)
    pub surcharge: Money,
    /// `band_tax + surcharge` rounded to whole units
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Stamp duty on a purchase, rounded to whole currency units.
///
/// A negative price is rejected rather than clamped; zero yields zero.
pub fn compute_transfer_tax(
    price: Money,
    is_additional_property: bool,
) -> PropertyReturnsResult<Money> {
    Ok(transfer_tax_breakdown(price, is_additional_property)?.total)
}

/// Banded marginal calculation with the per-band slices retained.
pub fn transfer_tax_breakdown(
    price: Money,
    is_additional_property: bool,
) -> PropertyReturnsResult<TransferTaxBreakdown> {
    if price < Decimal::ZERO {
        return Err(PropertyReturnsError::InvalidInput {
            field: "price".into(),
            reason: "Purchase price cannot be negative".into(),
        });
    }

    let mut slices = Vec::with_capacity(STAMP_DUTY_BANDS.len());
    let mut band_tax = Decimal::ZERO;

    for band in STAMP_DUTY_BANDS.iter() {
        if price <= band.lower {
            break;
        }
        let top = match band.upper {
            Some(upper) => price.min(upper),
            None => price,
        };
        let taxable_amount = top - band.lower;
        let tax = taxable_amount * band.rate / dec!(100);
        band_tax += tax;
        slices.push(BandSlice {
            band: *band,
            taxable_amount,
            tax,
        });
    }

    let surcharge = if is_additional_property {
        price * ADDITIONAL_PROPERTY_SURCHARGE / dec!(100)
    } else {
        Decimal::ZERO
    };

    let total = round_money(band_tax + surcharge, 0);
    log::debug!(
        "stamp duty on {price}: band tax {band_tax}, surcharge {surcharge}, total {total}"
    );

    Ok(TransferTaxBreakdown {
        price,
        is_additional_property,
        slices,
        band_tax,
        surcharge,
        total,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
