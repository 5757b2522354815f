use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{percent_of, require_non_negative, require_percent, require_positive, require_term};
use crate::error::PropertyReturnsError;
use crate::tax::stamp_duty::compute_transfer_tax;
use crate::time_value::{annual_debt_service, compute_amortized_payment};
use crate::types::{Money, Percent};
use crate::PropertyReturnsResult;

/// Benchmark single-let rent per month, as a share of price.
pub const SINGLE_LET_MONTHLY_RENT: Percent = dec!(0.5);
/// Benchmark single-let running costs, as a share of rent.
pub const SINGLE_LET_EXPENSE_RATIO: Percent = dec!(20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// House in multiple occupation let room by room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HmoInputs {
    pub purchase_price: Money,
    pub deposit_percent: Percent,
    pub mortgage_rate: Percent,
    pub mortgage_term: u32,
    pub refurb_costs: Money,
    pub conversion_costs: Money,
    pub licensing_fees: Money,
    /// Monthly rent per room
    pub room_rents: Vec<Money>,
    /// Declared room count; must match `room_rents` when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_rooms: Option<u32>,
    /// % of gross rent
    pub management_fee: Percent,
    /// % of gross rent
    pub maintenance_reserve: Percent,
    /// Annual
    pub insurance: Money,
    /// Annual gas, electrical and fire safety certification
    pub safety_certificates: Money,
    /// Monthly utilities, only a landlord cost when bills are included
    pub utilities: Money,
    pub bills_included: bool,
}

impl Default for HmoInputs {
    fn default() -> Self {
        HmoInputs {
            purchase_price: Decimal::ZERO,
            deposit_percent: dec!(25),
            mortgage_rate: dec!(5.5),
            mortgage_term: 25,
            refurb_costs: Decimal::ZERO,
            conversion_costs: Decimal::ZERO,
            licensing_fees: Decimal::ZERO,
            room_rents: Vec::new(),
            number_of_rooms: None,
            management_fee: dec!(12),
            maintenance_reserve: dec!(10),
            insurance: Decimal::ZERO,
            safety_certificates: Decimal::ZERO,
            utilities: Decimal::ZERO,
            bills_included: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmoCostBreakdown {
    pub management: Money,
    pub maintenance: Money,
    pub insurance: Money,
    pub safety_certificates: Money,
    pub utilities: Money,
    pub mortgage: Money,
}

impl HmoCostBreakdown {
    pub fn total(&self) -> Money {
        self.management
            + self.maintenance
            + self.insurance
            + self.safety_certificates
            + self.utilities
            + self.mortgage
    }
}

/// Rough single-let counterfactual on the same purchase. Illustrative only:
/// a flat 0.5%-of-price monthly rent and a flat 20% expense ratio, not a
/// calibrated rental model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleLetComparison {
    pub monthly_rent: Money,
    pub annual_rent: Money,
    pub annual_expenses: Money,
    pub annual_cash_flow: Money,
    /// HMO annual cash flow minus the single-let annual cash flow
    pub additional_annual_cash_flow: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmoResult {
    pub total_purchase_cost: Money,
    pub deposit_amount: Money,
    pub mortgage_amount: Money,
    pub stamp_duty: Money,
    pub total_cash_required: Money,
    pub number_of_rooms: u32,
    pub total_monthly_rent: Money,
    pub average_room_rent: Money,
    pub annual_gross_rent: Money,
    pub monthly_mortgage: Money,
    pub total_annual_costs: Money,
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// Gross rent over total purchase cost
    pub gross_yield: Percent,
    /// Annual cash flow over total purchase cost
    pub net_yield: Percent,
    pub roi: Percent,
    pub cost_breakdown: HmoCostBreakdown,
    pub single_let_comparison: SingleLetComparison,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Room-by-room HMO returns.
///
/// No void allowance is applied to HMO rent, unlike the single-let models.
pub fn compute_hmo(inputs: &HmoInputs) -> PropertyReturnsResult<HmoResult> {
    let number_of_rooms = validate_input(inputs)?;

    let price = inputs.purchase_price;
    let total_purchase_cost =
        price + inputs.refurb_costs + inputs.conversion_costs + inputs.licensing_fees;

    let deposit_amount = percent_of(price, inputs.deposit_percent);
    let mortgage_amount = price - deposit_amount;
    let stamp_duty = compute_transfer_tax(price, true)?;
    let total_cash_required = deposit_amount
        + stamp_duty
        + inputs.refurb_costs
        + inputs.conversion_costs
        + inputs.licensing_fees;

    let total_monthly_rent: Money = inputs.room_rents.iter().copied().sum();
    let annual_gross_rent = total_monthly_rent * dec!(12);

    let monthly_mortgage =
        compute_amortized_payment(mortgage_amount, inputs.mortgage_rate, inputs.mortgage_term)?;

    let cost_breakdown = HmoCostBreakdown {
        management: percent_of(annual_gross_rent, inputs.management_fee),
        maintenance: percent_of(annual_gross_rent, inputs.maintenance_reserve),
        insurance: inputs.insurance,
        safety_certificates: inputs.safety_certificates,
        utilities: if inputs.bills_included {
            inputs.utilities * dec!(12)
        } else {
            Decimal::ZERO
        },
        mortgage: annual_debt_service(monthly_mortgage),
    };
    let total_annual_costs = cost_breakdown.total();
    let annual_cash_flow = annual_gross_rent - total_annual_costs;

    if total_cash_required.is_zero() {
        return Err(PropertyReturnsError::DivisionByZero {
            context: "HMO ROI (annual cash flow / total cash required)".into(),
        });
    }

    let single_let_comparison =
        single_let_benchmark(price, cost_breakdown.mortgage, annual_cash_flow);

    log::debug!(
        "HMO: {number_of_rooms} rooms at {total_monthly_rent}/month, costs {total_annual_costs}/year, cash flow {annual_cash_flow}/year"
    );

    Ok(HmoResult {
        total_purchase_cost,
        deposit_amount,
        mortgage_amount,
        stamp_duty,
        total_cash_required,
        number_of_rooms,
        total_monthly_rent,
        average_room_rent: total_monthly_rent / Decimal::from(number_of_rooms),
        annual_gross_rent,
        monthly_mortgage,
        total_annual_costs,
        annual_cash_flow,
        monthly_cash_flow: annual_cash_flow / dec!(12),
        gross_yield: annual_gross_rent / total_purchase_cost * dec!(100),
        net_yield: annual_cash_flow / total_purchase_cost * dec!(100),
        roi: annual_cash_flow / total_cash_required * dec!(100),
        cost_breakdown,
        single_let_comparison,
    })
}

pub fn warnings(_inputs: &HmoInputs, result: &HmoResult) -> Vec<String> {
    let mut warnings = vec![
        "Single-let comparison uses a flat 0.5% monthly rent and 20% expense ratio — illustrative only"
            .to_string(),
    ];

    if result.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow of {:.2}/year — room rents do not cover costs",
            result.annual_cash_flow
        ));
    }
    if result.single_let_comparison.additional_annual_cash_flow < Decimal::ZERO {
        warnings.push("HMO returns less than the single-let benchmark".into());
    }

    warnings
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn single_let_benchmark(
    price: Money,
    annual_mortgage: Money,
    hmo_annual_cash_flow: Money,
) -> SingleLetComparison {
    let monthly_rent = percent_of(price, SINGLE_LET_MONTHLY_RENT);
    let annual_rent = monthly_rent * dec!(12);
    let annual_expenses = percent_of(annual_rent, SINGLE_LET_EXPENSE_RATIO);
    let annual_cash_flow = annual_rent - annual_expenses - annual_mortgage;

    SingleLetComparison {
        monthly_rent,
        annual_rent,
        annual_expenses,
        annual_cash_flow,
        additional_annual_cash_flow: hmo_annual_cash_flow - annual_cash_flow,
    }
}

/// Returns the validated room count.
fn validate_input(inputs: &HmoInputs) -> PropertyReturnsResult<u32> {
    require_positive("purchasePrice", inputs.purchase_price)?;
    require_percent("depositPercent", inputs.deposit_percent)?;
    require_percent("mortgageRate", inputs.mortgage_rate)?;
    require_term("mortgageTerm", inputs.mortgage_term)?;
    require_non_negative("refurbCosts", inputs.refurb_costs)?;
    require_non_negative("conversionCosts", inputs.conversion_costs)?;
    require_non_negative("licensingFees", inputs.licensing_fees)?;
    require_percent("managementFee", inputs.management_fee)?;
    require_percent("maintenanceReserve", inputs.maintenance_reserve)?;
    require_non_negative("insurance", inputs.insurance)?;
    require_non_negative("safetyCertificates", inputs.safety_certificates)?;
    require_non_negative("utilities", inputs.utilities)?;

    if inputs.room_rents.is_empty() {
        return Err(PropertyReturnsError::invalid(
            "roomRents",
            "At least one room rent is required",
        ));
    }
    for rent in &inputs.room_rents {
        require_non_negative("roomRents", *rent)?;
    }

    let listed = inputs.room_rents.len() as u32;
    match inputs.number_of_rooms {
        Some(declared) if declared != listed => Err(PropertyReturnsError::InvalidInput {
            field: "numberOfRooms".into(),
            reason: format!("Declared {declared} rooms but {listed} room rents were supplied"),
        }),
        _ => Ok(listed),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
