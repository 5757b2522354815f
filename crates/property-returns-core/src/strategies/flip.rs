use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{percent_of, require_non_negative, require_percent, require_positive};
use crate::error::PropertyReturnsError;
use crate::tax::stamp_duty::compute_transfer_tax;
use crate::types::{Money, Percent, Ratio};
use crate::PropertyReturnsResult;

/// Bridging lenders advance this share of the purchase price on a flip.
pub const FLIP_BRIDGING_LTV: Percent = dec!(70);

/// Below this margin a flip has little room for overruns.
const THIN_MARGIN: Percent = dec!(15);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlipInputs {
    pub purchase_price: Money,
    pub refurb_budget: Money,
    pub refurb_timeline_months: u32,
    /// Bridging interest per month
    pub bridging_rate: Percent,
    pub bridging_fee_percent: Percent,
    pub target_sale_price: Money,
    /// Estate agent fee on the sale price
    pub agent_fee_percent: Percent,
    pub legal_fees: Money,
    /// Apply the additional-property stamp duty surcharge
    pub additional_property: bool,
}

impl Default for FlipInputs {
    fn default() -> Self {
        FlipInputs {
            purchase_price: Decimal::ZERO,
            refurb_budget: Decimal::ZERO,
            refurb_timeline_months: 6,
            bridging_rate: dec!(0.75),
            bridging_fee_percent: dec!(2),
            target_sale_price: Decimal::ZERO,
            agent_fee_percent: dec!(1.5),
            legal_fees: Decimal::ZERO,
            additional_property: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipResult {
    /// Purchase price plus refurb budget
    pub total_costs: Money,
    pub bridging_amount: Money,
    pub cash_required: Money,
    pub bridging_interest: Money,
    pub bridging_fee: Money,
    pub stamp_duty: Money,
    pub agent_fee: Money,
    pub total_project_costs: Money,
    pub gross_profit: Money,
    /// Gross profit over sale price
    pub profit_margin: Ratio,
    pub roi_on_cash: Percent,
    pub monthly_roi: Percent,
    /// Simple (non-compounded) monthly ROI × 12
    pub annualised_roi: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Profit and return on cash for a bridged buy-refurbish-sell project.
pub fn compute_flip(inputs: &FlipInputs) -> PropertyReturnsResult<FlipResult> {
    validate_input(inputs)?;

    let price = inputs.purchase_price;
    let total_costs = price + inputs.refurb_budget;
    let bridging_amount = percent_of(price, FLIP_BRIDGING_LTV);
    let cash_required = total_costs - bridging_amount;

    let months = Decimal::from(inputs.refurb_timeline_months);
    let bridging_interest = percent_of(bridging_amount, inputs.bridging_rate) * months;
    let bridging_fee = percent_of(bridging_amount, inputs.bridging_fee_percent);

    let agent_fee = percent_of(inputs.target_sale_price, inputs.agent_fee_percent);
    let stamp_duty = compute_transfer_tax(price, inputs.additional_property)?;

    let total_project_costs =
        total_costs + bridging_interest + bridging_fee + stamp_duty + inputs.legal_fees + agent_fee;
    let gross_profit = inputs.target_sale_price - total_project_costs;

    if cash_required.is_zero() {
        return Err(PropertyReturnsError::DivisionByZero {
            context: "flip ROI (gross profit / cash required)".into(),
        });
    }

    let roi_on_cash = gross_profit / cash_required * dec!(100);
    let monthly_roi = roi_on_cash / months;

    log::debug!(
        "Flip: project costs {total_project_costs}, profit {gross_profit}, ROI {roi_on_cash}% over {months} months"
    );

    Ok(FlipResult {
        total_costs,
        bridging_amount,
        cash_required,
        bridging_interest,
        bridging_fee,
        stamp_duty,
        agent_fee,
        total_project_costs,
        gross_profit,
        profit_margin: Ratio::percent_of(gross_profit, inputs.target_sale_price),
        roi_on_cash,
        monthly_roi,
        annualised_roi: monthly_roi * dec!(12),
    })
}

pub fn warnings(_inputs: &FlipInputs, result: &FlipResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.gross_profit < Decimal::ZERO {
        warnings.push(format!(
            "Project loses {:.2} at the target sale price",
            -result.gross_profit
        ));
    } else if let Some(margin) = result.profit_margin.finite() {
        if margin < THIN_MARGIN {
            warnings.push(format!(
                "Profit margin of {margin:.1}% is below 15% — little headroom for overruns"
            ));
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(inputs: &FlipInputs) -> PropertyReturnsResult<()> {
    require_positive("purchasePrice", inputs.purchase_price)?;
    require_non_negative("refurbBudget", inputs.refurb_budget)?;
    if inputs.refurb_timeline_months == 0 {
        return Err(PropertyReturnsError::invalid(
            "refurbTimelineMonths",
            "Timeline must be at least 1 month",
        ));
    }
    require_percent("bridgingRate", inputs.bridging_rate)?;
    require_percent("bridgingFeePercent", inputs.bridging_fee_percent)?;
    require_non_negative("targetSalePrice", inputs.target_sale_price)?;
    require_percent("agentFeePercent", inputs.agent_fee_percent)?;
    require_non_negative("legalFees", inputs.legal_fees)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
