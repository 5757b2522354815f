use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{percent_of, require_non_negative, require_percent};
use crate::time_value::annual_debt_service;
use crate::types::{Money, Percent, Ratio};
use crate::PropertyReturnsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Single-let rental income and running costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RentalAssumptions {
    pub monthly_rent: Money,
    /// Share of the year the property sits empty
    pub void_percent: Percent,
    /// Tenant-find fee, % of effective rent
    pub letting_agent_fee: Percent,
    /// Ongoing management, % of effective rent
    pub management_fee: Percent,
    /// Maintenance allowance, % of effective rent
    pub maintenance_percent: Percent,
    /// Annual landlord insurance
    pub insurance: Money,
    /// Annual service charge (leasehold)
    pub service_charge: Money,
    /// Annual ground rent (leasehold)
    pub ground_rent: Money,
}

impl Default for RentalAssumptions {
    fn default() -> Self {
        RentalAssumptions {
            monthly_rent: Decimal::ZERO,
            void_percent: dec!(5),
            letting_agent_fee: dec!(8),
            management_fee: dec!(10),
            maintenance_percent: dec!(10),
            insurance: Decimal::ZERO,
            service_charge: Decimal::ZERO,
            ground_rent: Decimal::ZERO,
        }
    }
}

/// Each annual cost line deducted from rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub letting_agent: Money,
    pub management: Money,
    pub maintenance: Money,
    pub insurance: Money,
    pub service_charge: Money,
    pub ground_rent: Money,
    pub mortgage: Money,
}

impl CostBreakdown {
    pub fn total(&self) -> Money {
        self.letting_agent
            + self.management
            + self.maintenance
            + self.insurance
            + self.service_charge
            + self.ground_rent
            + self.mortgage
    }
}

/// Annual rental position after voids, running costs and debt service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCashFlow {
    /// Twelve months of rent with no voids
    pub annual_rent: Money,
    pub effective_annual_rent: Money,
    pub void_loss: Money,
    pub cost_breakdown: CostBreakdown,
    pub total_annual_costs: Money,
    pub annual_cash_flow: Money,
    pub monthly_cash_flow: Money,
    /// Occupancy at which cash flow is exactly zero
    pub break_even_occupancy: Ratio,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn validate(assumptions: &RentalAssumptions) -> PropertyReturnsResult<()> {
    require_non_negative("monthlyRent", assumptions.monthly_rent)?;
    require_percent("voidPercent", assumptions.void_percent)?;
    require_percent("lettingAgentFee", assumptions.letting_agent_fee)?;
    require_percent("managementFee", assumptions.management_fee)?;
    require_percent("maintenancePercent", assumptions.maintenance_percent)?;
    require_non_negative("insurance", assumptions.insurance)?;
    require_non_negative("serviceCharge", assumptions.service_charge)?;
    require_non_negative("groundRent", assumptions.ground_rent)?;
    Ok(())
}

/// Rent less voids, percentage fees, flat costs and twelve mortgage payments.
pub fn rental_cash_flow(assumptions: &RentalAssumptions, monthly_mortgage: Money) -> RentalCashFlow {
    let annual_rent = assumptions.monthly_rent * dec!(12);
    let effective_annual_rent = annual_rent * (Decimal::ONE - assumptions.void_percent / dec!(100));

    let cost_breakdown = CostBreakdown {
        letting_agent: percent_of(effective_annual_rent, assumptions.letting_agent_fee),
        management: percent_of(effective_annual_rent, assumptions.management_fee),
        maintenance: percent_of(effective_annual_rent, assumptions.maintenance_percent),
        insurance: assumptions.insurance,
        service_charge: assumptions.service_charge,
        ground_rent: assumptions.ground_rent,
        mortgage: annual_debt_service(monthly_mortgage),
    };
    let total_annual_costs = cost_breakdown.total();
    let annual_cash_flow = effective_annual_rent - total_annual_costs;

    RentalCashFlow {
        annual_rent,
        effective_annual_rent,
        void_loss: annual_rent - effective_annual_rent,
        cost_breakdown,
        total_annual_costs,
        annual_cash_flow,
        monthly_cash_flow: annual_cash_flow / dec!(12),
        break_even_occupancy: Ratio::percent_of(total_annual_costs, annual_rent),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
