use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::strategy::{self, CalculationResult, Strategy, StrategyInputs};
use crate::PropertyReturnsResult;

/// A saved calculation as the persistence layer stores it.
///
/// Never mutated after creation; results are recomputed from `inputs`
/// rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub inputs: StrategyInputs,
}

impl Scenario {
    pub fn new(id: impl Into<String>, inputs: StrategyInputs, created_at: DateTime<Utc>) -> Self {
        Scenario {
            id: id.into(),
            name: None,
            created_at,
            inputs,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.inputs.strategy()
    }

    pub fn evaluate(&self) -> PropertyReturnsResult<CalculationResult> {
        strategy::compute(&self.inputs)
    }
}
