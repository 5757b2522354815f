use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rental::{self, CostBreakdown, RentalAssumptions};
use super::{percent_of, require_non_negative, require_percent, require_positive, require_term};
use crate::error::PropertyReturnsError;
use crate::tax::stamp_duty::compute_transfer_tax;
use crate::time_value::compute_amortized_payment;
use crate::types::{Money, Percent, Ratio};
use crate::PropertyReturnsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Buy-to-let purchase, financing and letting assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BtlInputs {
    pub purchase_price: Money,
    pub deposit_percent: Percent,
    /// Annual mortgage interest rate
    pub mortgage_rate: Percent,
    /// Mortgage term in years
    pub mortgage_term: u32,
    #[serde(flatten)]
    pub rental: RentalAssumptions,
    pub legal_fees: Money,
    pub survey_fees: Money,
    pub broker_fees: Money,
    pub refurb_costs: Money,
}

impl Default for BtlInputs {
    fn default() -> Self {
        BtlInputs {
            purchase_price: Decimal::ZERO,
            deposit_percent: dec!(25),
            mortgage_rate: dec!(5.5),
            mortgage_term: 25,
            rental: RentalAssumptions::default(),
            legal_fees: Decimal::ZERO,
            survey_fees: Decimal::ZERO,
            broker_fees: Decimal::ZERO,
            refurb_costs: Decimal::ZERO,
        }
    }
}

/// Buy-to-let returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtlResult {
    pub deposit_amount: Money,
    pub mortgage_amount: Money,
    pub stamp_duty: Money,
    pub total_cash_required: Money,
    pub monthly_mortgage: Money,
    pub annual_rent: Money,
    pub effective_annual_rent: Money,
    pub total_annual_costs: Money,
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// Rent with no voids over purchase price
    pub gross_yield: Percent,
    /// Annual cash flow over purchase price
    pub net_yield: Percent,
    /// Annual cash flow over cash invested
    pub roi: Percent,
    pub break_even_occupancy: Ratio,
    pub loan_to_value: Percent,
    pub cost_breakdown: CostBreakdown,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Cash flow, yield and ROI for a buy-to-let purchase.
///
/// Stamp duty always includes the additional-property surcharge.
pub fn compute_btl(inputs: &BtlInputs) -> PropertyReturnsResult<BtlResult> {
    validate_input(inputs)?;

    let price = inputs.purchase_price;
    let deposit_amount = percent_of(price, inputs.deposit_percent);
    let mortgage_amount = price - deposit_amount;
    let stamp_duty = compute_transfer_tax(price, true)?;

    let total_cash_required = deposit_amount
        + stamp_duty
        + inputs.legal_fees
        + inputs.survey_fees
        + inputs.broker_fees
        + inputs.refurb_costs;

    let monthly_mortgage =
        compute_amortized_payment(mortgage_amount, inputs.mortgage_rate, inputs.mortgage_term)?;
    let cash_flow = rental::rental_cash_flow(&inputs.rental, monthly_mortgage);

    if total_cash_required.is_zero() {
        return Err(PropertyReturnsError::DivisionByZero {
            context: "BTL ROI (annual cash flow / total cash required)".into(),
        });
    }

    log::debug!(
        "BTL: price {price}, cash in {total_cash_required}, mortgage {monthly_mortgage}/month, cash flow {}/year",
        cash_flow.annual_cash_flow
    );

    Ok(BtlResult {
        deposit_amount,
        mortgage_amount,
        stamp_duty,
        total_cash_required,
        monthly_mortgage,
        annual_rent: cash_flow.annual_rent,
        effective_annual_rent: cash_flow.effective_annual_rent,
        total_annual_costs: cash_flow.total_annual_costs,
        annual_cash_flow: cash_flow.annual_cash_flow,
        monthly_cash_flow: cash_flow.monthly_cash_flow,
        gross_yield: cash_flow.annual_rent / price * dec!(100),
        net_yield: cash_flow.annual_cash_flow / price * dec!(100),
        roi: cash_flow.annual_cash_flow / total_cash_required * dec!(100),
        break_even_occupancy: cash_flow.break_even_occupancy,
        loan_to_value: mortgage_amount / price * dec!(100),
        cost_breakdown: cash_flow.cost_breakdown,
    })
}

/// Non-fatal observations about a computed deal.
pub fn warnings(inputs: &BtlInputs, result: &BtlResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow of {:.2}/year — rent does not cover costs",
            result.annual_cash_flow
        ));
    }
    if result.loan_to_value > dec!(80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — few buy-to-let lenders go this high",
            result.loan_to_value
        ));
    }
    if inputs.rental.void_percent > dec!(15) {
        warnings.push(format!(
            "Void allowance of {:.1}% exceeds 15% — above typical market norms",
            inputs.rental.void_percent
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(inputs: &BtlInputs) -> PropertyReturnsResult<()> {
    require_positive("purchasePrice", inputs.purchase_price)?;
    require_percent("depositPercent", inputs.deposit_percent)?;
    require_percent("mortgageRate", inputs.mortgage_rate)?;
    require_term("mortgageTerm", inputs.mortgage_term)?;
    require_non_negative("legalFees", inputs.legal_fees)?;
    require_non_negative("surveyFees", inputs.survey_fees)?;
    require_non_negative("brokerFees", inputs.broker_fees)?;
    require_non_negative("refurbCosts", inputs.refurb_costs)?;
    rental::validate(&inputs.rental)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> BtlInputs {
        BtlInputs {
            purchase_price: dec!(250000),
            deposit_percent: dec!(25),
            mortgage_rate: dec!(5.5),
            mortgage_term: 25,
            rental: RentalAssumptions {
                monthly_rent: dec!(1200),
                void_percent: dec!(5),
                letting_agent_fee: dec!(8),
                management_fee: dec!(10),
                maintenance_percent: dec!(10),
                insurance: dec!(300),
                service_charge: dec!(0),
                ground_rent: dec!(0),
            },
            legal_fees: dec!(1500),
            survey_fees: dec!(500),
            broker_fees: dec!(500),
            refurb_costs: dec!(0),
        }
    }

    #[test]
    fn test_deposit_and_mortgage_split() {
        let result = compute_btl(&sample_input()).unwrap();
        assert_eq!(result.deposit_amount, dec!(62500));
        assert_eq!(result.mortgage_amount, dec!(187500));
        assert_eq!(result.loan_to_value, dec!(75));
    }

    #[test]
    fn test_stamp_duty_includes_surcharge() {
        let result = compute_btl(&sample_input()).unwrap();
        assert_eq!(result.stamp_duty, dec!(7500));
    }

    #[test]
    fn test_total_cash_required() {
        let result = compute_btl(&sample_input()).unwrap();
        // 62,500 + 7,500 + 1,500 + 500 + 500
        assert_eq!(result.total_cash_required, dec!(72500));
    }

    #[test]
    fn test_gross_yield() {
        let result = compute_btl(&sample_input()).unwrap();
        assert_eq!(result.gross_yield, dec!(5.76));
    }

    #[test]
    fn test_cost_breakdown_uses_effective_rent() {
        let result = compute_btl(&sample_input()).unwrap();
        // 14,400 * 0.95
        assert_eq!(result.effective_annual_rent, dec!(13680));
        assert_eq!(result.cost_breakdown.letting_agent, dec!(1094.4));
        assert_eq!(result.cost_breakdown.management, dec!(1368));
        assert_eq!(result.cost_breakdown.maintenance, dec!(1368));
        assert_eq!(result.cost_breakdown.insurance, dec!(300));
        assert_eq!(
            result.cost_breakdown.mortgage,
            result.monthly_mortgage * dec!(12)
        );
    }

    #[test]
    fn test_cash_flow_identity() {
        let result = compute_btl(&sample_input()).unwrap();
        assert_eq!(
            result.annual_cash_flow,
            result.effective_annual_rent - result.total_annual_costs
        );
        assert_eq!(result.monthly_cash_flow * dec!(12), result.annual_cash_flow);
    }

    #[test]
    fn test_sample_deal_is_cash_negative_with_warning() {
        let input = sample_input();
        let result = compute_btl(&input).unwrap();
        // Heavy fee load plus ~13.8k debt service exceeds 13.68k effective rent
        assert!(result.annual_cash_flow < Decimal::ZERO);
        assert!(result.roi < Decimal::ZERO);
        let w = warnings(&input, &result);
        assert!(w.iter().any(|m| m.contains("Negative cash flow")));
    }

    #[test]
    fn test_cash_buyer() {
        let mut input = sample_input();
        input.deposit_percent = dec!(100);
        let result = compute_btl(&input).unwrap();
        assert_eq!(result.mortgage_amount, Decimal::ZERO);
        assert_eq!(result.monthly_mortgage, Decimal::ZERO);
        assert!(result.annual_cash_flow > Decimal::ZERO);
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut input = sample_input();
        input.purchase_price = Decimal::ZERO;
        assert!(compute_btl(&input).is_err());
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut input = sample_input();
        input.mortgage_term = 0;
        let err = compute_btl(&input).unwrap_err();
        assert!(err.to_string().contains("mortgageTerm"));
    }

    #[test]
    fn test_out_of_range_terms_rejected_without_panic() {
        let mut input = sample_input();
        input.mortgage_rate = dec!(100);
        input.mortgage_term = 80;
        let err = compute_btl(&input).unwrap_err();
        assert!(err.to_string().contains("mortgageTerm"));

        let mut input = sample_input();
        input.mortgage_term = 2000;
        let err = compute_btl(&input).unwrap_err();
        assert!(err.to_string().contains("mortgageTerm"));
    }

    #[test]
    fn test_maximum_rate_and_term_still_computes() {
        let mut input = sample_input();
        input.mortgage_rate = dec!(100);
        input.mortgage_term = crate::time_value::MAX_TERM_YEARS;
        let result = compute_btl(&input).unwrap();
        assert!(result.monthly_mortgage > result.mortgage_amount / dec!(12));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut input = sample_input();
        input.legal_fees = dec!(-100);
        assert!(compute_btl(&input).is_err());
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let input: BtlInputs =
            serde_json::from_str(r#"{"purchasePrice": 200000, "monthlyRent": 1000}"#).unwrap();
        assert_eq!(input.deposit_percent, dec!(25));
        assert_eq!(input.mortgage_term, 25);
        assert_eq!(input.rental.void_percent, dec!(5));
        assert_eq!(input.rental.monthly_rent, dec!(1000));
        assert!(compute_btl(&input).is_ok());
    }

    #[test]
    fn test_high_ltv_warning() {
        let mut input = sample_input();
        input.deposit_percent = dec!(10);
        let result = compute_btl(&input).unwrap();
        let w = warnings(&input, &result);
        assert!(w.iter().any(|m| m.contains("LTV")));
    }
}
