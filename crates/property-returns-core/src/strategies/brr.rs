use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rental::{self, CostBreakdown, RentalAssumptions};
use super::{percent_of, require_non_negative, require_percent, require_positive, require_term};
use crate::time_value::compute_amortized_payment;
use crate::types::{Money, Percent, Ratio};
use crate::PropertyReturnsResult;

/// Bridging lenders advance this share of the purchase price.
pub const BRIDGING_LTV: Percent = dec!(75);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Buy, refurbish, refinance: bridge the purchase, remortgage on the ARV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrrInputs {
    pub purchase_price: Money,
    pub refurb_budget: Money,
    pub refurb_timeline_months: u32,
    /// Bridging interest per month
    pub bridging_rate: Percent,
    /// Arrangement fee on the bridging loan
    pub bridging_fee_percent: Percent,
    /// After-repair value
    pub estimated_arv: Money,
    pub new_mortgage_ltv: Percent,
    pub new_mortgage_rate: Percent,
    pub new_mortgage_term: u32,
    #[serde(flatten)]
    pub rental: RentalAssumptions,
}

impl Default for BrrInputs {
    fn default() -> Self {
        BrrInputs {
            purchase_price: Decimal::ZERO,
            refurb_budget: Decimal::ZERO,
            refurb_timeline_months: 6,
            bridging_rate: dec!(0.75),
            bridging_fee_percent: dec!(2),
            estimated_arv: Decimal::ZERO,
            new_mortgage_ltv: dec!(75),
            new_mortgage_rate: dec!(5.5),
            new_mortgage_term: 25,
            rental: RentalAssumptions::default(),
        }
    }
}

/// Both stages of a BRR deal plus the let-out position after refinance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrrResult {
    // Stage 1: bridging
    pub total_initial_cost: Money,
    pub bridging_amount: Money,
    pub cash_required: Money,
    pub bridging_interest: Money,
    pub bridging_fee: Money,
    pub total_bridging_costs: Money,
    // Stage 2: refinance
    pub new_mortgage_amount: Money,
    pub cash_out_at_refinance: Money,
    /// Negative when the refinance returns more than was put in
    pub cash_left_in_deal: Money,
    pub equity_gained: Money,
    // Post-refinance letting
    pub monthly_mortgage: Money,
    pub effective_annual_rent: Money,
    pub total_annual_costs: Money,
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    pub cash_on_cash_return: Ratio,
    pub cost_breakdown: CostBreakdown,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Two-stage BRR simulation: bridging finance, then refinance and let.
///
/// Cash-on-cash return is `Ratio::Infinite` whenever no cash remains in
/// the deal (`cash_left_in_deal <= 0`).
pub fn compute_brr(inputs: &BrrInputs) -> PropertyReturnsResult<BrrResult> {
    validate_input(inputs)?;

    // --- Stage 1: bridging ---
    let total_initial_cost = inputs.purchase_price + inputs.refurb_budget;
    let bridging_amount = percent_of(inputs.purchase_price, BRIDGING_LTV);
    let cash_required = total_initial_cost - bridging_amount;
    let bridging_interest = percent_of(bridging_amount, inputs.bridging_rate)
        * Decimal::from(inputs.refurb_timeline_months);
    let bridging_fee = percent_of(bridging_amount, inputs.bridging_fee_percent);
    let total_bridging_costs = bridging_interest + bridging_fee;

    // --- Stage 2: refinance ---
    let new_mortgage_amount = percent_of(inputs.estimated_arv, inputs.new_mortgage_ltv);
    let cash_out_at_refinance = new_mortgage_amount - bridging_amount - total_bridging_costs;
    let cash_left_in_deal = total_initial_cost - new_mortgage_amount + total_bridging_costs;
    let equity_gained = inputs.estimated_arv - total_initial_cost - total_bridging_costs;

    // --- Post-refinance letting ---
    let monthly_mortgage = compute_amortized_payment(
        new_mortgage_amount,
        inputs.new_mortgage_rate,
        inputs.new_mortgage_term,
    )?;
    let cash_flow = rental::rental_cash_flow(&inputs.rental, monthly_mortgage);

    let cash_on_cash_return = if cash_left_in_deal <= Decimal::ZERO {
        Ratio::Infinite
    } else {
        Ratio::percent_of(cash_flow.annual_cash_flow, cash_left_in_deal)
    };

    log::debug!(
        "BRR: bridge {bridging_amount} costing {total_bridging_costs}, refinance {new_mortgage_amount}, cash left {cash_left_in_deal}"
    );

    Ok(BrrResult {
        total_initial_cost,
        bridging_amount,
        cash_required,
        bridging_interest,
        bridging_fee,
        total_bridging_costs,
        new_mortgage_amount,
        cash_out_at_refinance,
        cash_left_in_deal,
        equity_gained,
        monthly_mortgage,
        effective_annual_rent: cash_flow.effective_annual_rent,
        total_annual_costs: cash_flow.total_annual_costs,
        annual_cash_flow: cash_flow.annual_cash_flow,
        monthly_cash_flow: cash_flow.monthly_cash_flow,
        cash_on_cash_return,
        cost_breakdown: cash_flow.cost_breakdown,
    })
}

pub fn warnings(inputs: &BrrInputs, result: &BrrResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.cash_left_in_deal <= Decimal::ZERO {
        warnings.push(format!(
            "All cash recycled at refinance ({:.2} extracted) — cash-on-cash return is unbounded",
            -result.cash_left_in_deal
        ));
    }
    if result.equity_gained < Decimal::ZERO {
        warnings.push(format!(
            "ARV of {:.2} does not cover purchase, refurb and bridging costs",
            inputs.estimated_arv
        ));
    }
    if result.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative post-refinance cash flow of {:.2}/year",
            result.annual_cash_flow
        ));
    }
    if inputs.new_mortgage_ltv > dec!(80) {
        warnings.push(format!(
            "Refinance LTV of {:.1}% exceeds 80% — high leverage",
            inputs.new_mortgage_ltv
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(inputs: &BrrInputs) -> PropertyReturnsResult<()> {
    require_positive("purchasePrice", inputs.purchase_price)?;
    require_non_negative("refurbBudget", inputs.refurb_budget)?;
    require_percent("bridgingRate", inputs.bridging_rate)?;
    require_percent("bridgingFeePercent", inputs.bridging_fee_percent)?;
    require_non_negative("estimatedArv", inputs.estimated_arv)?;
    require_percent("newMortgageLtv", inputs.new_mortgage_ltv)?;
    require_percent("newMortgageRate", inputs.new_mortgage_rate)?;
    require_term("newMortgageTerm", inputs.new_mortgage_term)?;
    rental::validate(&inputs.rental)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// 150k purchase, 30k works over 6 months, revalued at 220k.
    fn sample_input() -> BrrInputs {
        BrrInputs {
            purchase_price: dec!(150000),
            refurb_budget: dec!(30000),
            refurb_timeline_months: 6,
            bridging_rate: dec!(0.75),
            bridging_fee_percent: dec!(2),
            estimated_arv: dec!(220000),
            new_mortgage_ltv: dec!(75),
            new_mortgage_rate: dec!(5.5),
            new_mortgage_term: 25,
            rental: RentalAssumptions {
                monthly_rent: dec!(1300),
                void_percent: dec!(5),
                letting_agent_fee: dec!(0),
                management_fee: dec!(10),
                maintenance_percent: dec!(5),
                insurance: dec!(350),
                service_charge: dec!(0),
                ground_rent: dec!(0),
            },
        }
    }

    #[test]
    fn test_bridging_stage() {
        let result = compute_brr(&sample_input()).unwrap();
        assert_eq!(result.total_initial_cost, dec!(180000));
        assert_eq!(result.bridging_amount, dec!(112500));
        assert_eq!(result.cash_required, dec!(67500));
        // 112,500 * 0.75% * 6
        assert_eq!(result.bridging_interest, dec!(5062.5));
        assert_eq!(result.bridging_fee, dec!(2250));
        assert_eq!(result.total_bridging_costs, dec!(7312.5));
    }

    #[test]
    fn test_refinance_stage() {
        let result = compute_brr(&sample_input()).unwrap();
        assert_eq!(result.new_mortgage_amount, dec!(165000));
        // 165,000 - 112,500 - 7,312.5
        assert_eq!(result.cash_out_at_refinance, dec!(45187.5));
        // 180,000 - 165,000 + 7,312.5
        assert_eq!(result.cash_left_in_deal, dec!(22312.5));
        // 220,000 - 180,000 - 7,312.5
        assert_eq!(result.equity_gained, dec!(32687.5));
    }

    #[test]
    fn test_finite_cash_on_cash() {
        let result = compute_brr(&sample_input()).unwrap();
        let expected = result.annual_cash_flow / result.cash_left_in_deal * dec!(100);
        assert_eq!(result.cash_on_cash_return, Ratio::Finite(expected));
    }

    #[test]
    fn test_cash_extracted_is_infinite_return() {
        let mut input = sample_input();
        input.estimated_arv = dec!(300000);
        let result = compute_brr(&input).unwrap();
        assert!(result.cash_left_in_deal < Decimal::ZERO);
        assert!(result.cash_on_cash_return.is_infinite());
        assert!(warnings(&input, &result)
            .iter()
            .any(|w| w.contains("unbounded")));
    }

    #[test]
    fn test_zero_timeline_has_no_interest() {
        let mut input = sample_input();
        input.refurb_timeline_months = 0;
        let result = compute_brr(&input).unwrap();
        assert_eq!(result.bridging_interest, Decimal::ZERO);
        assert_eq!(result.total_bridging_costs, dec!(2250));
    }

    #[test]
    fn test_uses_new_mortgage_for_cash_flow() {
        let result = compute_brr(&sample_input()).unwrap();
        let expected = compute_amortized_payment(dec!(165000), dec!(5.5), 25).unwrap();
        assert_eq!(result.monthly_mortgage, expected);
        assert_eq!(result.cost_breakdown.mortgage, expected * dec!(12));
    }

    #[test]
    fn test_ltv_over_100_rejected() {
        let mut input = sample_input();
        input.new_mortgage_ltv = dec!(110);
        assert!(compute_brr(&input).is_err());
    }
}
