use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use property_returns_core::strategies::brr::{compute_brr, BrrInputs};
use property_returns_core::strategies::btl::{compute_btl, BtlInputs};
use property_returns_core::strategies::flip::{compute_flip, FlipInputs};
use property_returns_core::strategies::hmo::{compute_hmo, HmoInputs};
use property_returns_core::strategies::rental::RentalAssumptions;
use property_returns_core::tax::stamp_duty::compute_transfer_tax;
use property_returns_core::time_value::compute_amortized_payment;
use property_returns_core::{compute, round_money, Ratio, StrategyInputs};

fn reference_btl() -> BtlInputs {
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

fn reference_hmo(room_rents: Vec<Decimal>) -> HmoInputs {
    HmoInputs {
        purchase_price: dec!(320000),
        refurb_costs: dec!(15000),
        conversion_costs: dec!(30000),
        licensing_fees: dec!(1200),
        room_rents,
        insurance: dec!(900),
        safety_certificates: dec!(350),
        utilities: dec!(500),
        ..Default::default()
    }
}

// ===========================================================================
// End-to-end examples
// ===========================================================================

#[test]
fn test_btl_reference_deal() {
    let result = compute_btl(&reference_btl()).unwrap();
    assert_eq!(result.deposit_amount, dec!(62500));
    assert_eq!(result.mortgage_amount, dec!(187500));
    // 0% band covers the whole price; 3% surcharge on 250,000
    assert_eq!(result.stamp_duty, dec!(7500));
    assert_eq!(result.gross_yield, dec!(5.76));
}

#[test]
fn test_btl_reference_deal_from_json() {
    let json = r#"{
        "strategy": "btl",
        "purchasePrice": 250000, "depositPercent": 25, "mortgageRate": 5.5,
        "mortgageTerm": 25, "monthlyRent": 1200, "voidPercent": 5,
        "lettingAgentFee": 8, "managementFee": 10, "maintenancePercent": 10,
        "insurance": 300, "legalFees": 1500, "surveyFees": 500, "brokerFees": 500,
        "refurbCosts": 0, "serviceCharge": 0, "groundRent": 0
    }"#;
    let inputs: StrategyInputs = serde_json::from_str(json).unwrap();
    assert_eq!(inputs, StrategyInputs::Btl(reference_btl()));
}

#[test]
fn test_transfer_tax_top_band() {
    // Follows STAMP_DUTY_BANDS. A quoted 45,750 leaves out the 10% band.
    // 0 + 33,750 (5% band) + 57,500 (10% band) + 12,000 (12% above 1.5m)
    assert_eq!(
        compute_transfer_tax(dec!(1600000), false).unwrap(),
        dec!(103250)
    );
}

#[test]
fn test_brr_zero_cash_left_is_infinite() {
    // No bridging costs, refinance returns exactly the purchase price
    let inputs = BrrInputs {
        purchase_price: dec!(100000),
        refurb_budget: dec!(0),
        refurb_timeline_months: 0,
        bridging_rate: dec!(0),
        bridging_fee_percent: dec!(0),
        estimated_arv: dec!(200000),
        new_mortgage_ltv: dec!(50),
        rental: RentalAssumptions {
            monthly_rent: dec!(900),
            ..Default::default()
        },
        ..Default::default()
    };
    let result = compute_brr(&inputs).unwrap();
    assert_eq!(result.cash_left_in_deal, Decimal::ZERO);
    assert_eq!(result.cash_on_cash_return, Ratio::Infinite);
}

#[test]
fn test_flip_zero_timeline_is_rejected_not_infinite() {
    let inputs = FlipInputs {
        purchase_price: dec!(150000),
        target_sale_price: dec!(200000),
        refurb_timeline_months: 0,
        ..Default::default()
    };
    assert!(compute_flip(&inputs).is_err());
}

#[test]
fn test_hmo_room_count_must_match() {
    let mut inputs = reference_hmo(vec![dec!(500), dec!(550)]);
    inputs.number_of_rooms = Some(3);
    assert!(compute_hmo(&inputs).is_err());
}

#[test]
fn test_compute_is_idempotent_for_every_strategy() {
    let all: Vec<StrategyInputs> = vec![
        reference_btl().into(),
        BrrInputs {
            purchase_price: dec!(150000),
            refurb_budget: dec!(30000),
            estimated_arv: dec!(220000),
            rental: RentalAssumptions {
                monthly_rent: dec!(1300),
                ..Default::default()
            },
            ..Default::default()
        }
        .into(),
        reference_hmo(vec![dec!(600), dec!(625), dec!(575), dec!(650)]).into(),
        FlipInputs {
            purchase_price: dec!(200000),
            refurb_budget: dec!(40000),
            target_sale_price: dec!(320000),
            ..Default::default()
        }
        .into(),
    ];

    for inputs in &all {
        let first = compute(inputs).unwrap();
        let second = compute(inputs).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_second_band_is_five_percent_of_excess(price in 250_000u64..925_000) {
        let price = Decimal::from(price);
        let expected = round_money((price - dec!(250000)) * dec!(0.05), 0);
        prop_assert_eq!(compute_transfer_tax(price, false).unwrap(), expected);
    }

    #[test]
    fn prop_surcharge_is_three_percent_of_price(pounds in 0u64..3_000_000, pence in 0u64..100) {
        let price = Decimal::from(pounds) + Decimal::from(pence) / dec!(100);
        let with = compute_transfer_tax(price, true).unwrap();
        let without = compute_transfer_tax(price, false).unwrap();
        let diff = (with - without - price * dec!(0.03)).abs();
        prop_assert!(diff <= Decimal::ONE, "diff {} at price {}", diff, price);
    }

    #[test]
    fn prop_zero_rate_payment_is_straight_line(principal in 1u64..2_000_000, term in 1u32..40) {
        let principal = Decimal::from(principal);
        let payment = compute_amortized_payment(principal, Decimal::ZERO, term).unwrap();
        prop_assert_eq!(payment, round_money(principal / Decimal::from(term * 12), 2));
    }

    #[test]
    fn prop_more_rent_more_cash_flow(rent in 300u32..5_000, extra in 1u32..1_000) {
        let mut low = reference_btl();
        low.rental.monthly_rent = Decimal::from(rent);
        let mut high = low.clone();
        high.rental.monthly_rent = Decimal::from(rent + extra);

        let low = compute_btl(&low).unwrap();
        let high = compute_btl(&high).unwrap();
        prop_assert!(high.annual_cash_flow > low.annual_cash_flow);
        prop_assert!(high.net_yield > low.net_yield);
    }

    #[test]
    fn prop_higher_rate_lower_cash_flow(low_bp in 0u32..1_000, step_bp in 10u32..500) {
        let mut cheap = reference_btl();
        cheap.mortgage_rate = Decimal::from(low_bp) / dec!(100);
        let mut dear = cheap.clone();
        dear.mortgage_rate = Decimal::from(low_bp + step_bp) / dec!(100);

        let cheap = compute_btl(&cheap).unwrap();
        let dear = compute_btl(&dear).unwrap();
        prop_assert!(dear.monthly_cash_flow < cheap.monthly_cash_flow);
    }

    #[test]
    fn prop_hmo_rent_ignores_room_order(rents in prop::collection::vec(0u32..2_000, 1..12)) {
        let rents: Vec<Decimal> = rents.into_iter().map(Decimal::from).collect();
        let expected: Decimal = rents.iter().copied().sum();

        let mut reversed = rents.clone();
        reversed.reverse();
        let mut rotated = rents.clone();
        rotated.rotate_left(rents.len() / 2);

        for order in [rents, reversed, rotated] {
            let result = compute_hmo(&reference_hmo(order)).unwrap();
            prop_assert_eq!(result.total_monthly_rent, expected);
        }
    }
}
