use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::strategies::brr::{self, BrrInputs, BrrResult};
use crate::strategies::btl::{self, BtlInputs, BtlResult};
use crate::strategies::flip::{self, FlipInputs, FlipResult};
use crate::strategies::hmo::{self, HmoInputs, HmoResult};
use crate::types::{with_metadata, ComputationOutput};
use crate::PropertyReturnsResult;

/// Investment strategy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Btl,
    Brr,
    Hmo,
    Flip,
}

impl Strategy {
    pub fn methodology(&self) -> &'static str {
        match self {
            Strategy::Btl => "Buy-to-Let Cash Flow and Yield",
            Strategy::Brr => "Buy, Refurbish, Refinance (Bridging then Remortgage)",
            Strategy::Hmo => "HMO Room-by-Room Cash Flow",
            Strategy::Flip => "Bridged Refurbish-and-Sell Profit",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Btl => "btl",
            Strategy::Brr => "brr",
            Strategy::Hmo => "hmo",
            Strategy::Flip => "flip",
        };
        f.write_str(s)
    }
}

/// Inputs for any strategy, tagged by `"strategy"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum StrategyInputs {
    Btl(BtlInputs),
    Brr(BrrInputs),
    Hmo(HmoInputs),
    Flip(FlipInputs),
}

impl StrategyInputs {
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyInputs::Btl(_) => Strategy::Btl,
            StrategyInputs::Brr(_) => Strategy::Brr,
            StrategyInputs::Hmo(_) => Strategy::Hmo,
            StrategyInputs::Flip(_) => Strategy::Flip,
        }
    }
}

impl From<BtlInputs> for StrategyInputs {
    fn from(inputs: BtlInputs) -> Self {
        StrategyInputs::Btl(inputs)
    }
}

impl From<BrrInputs> for StrategyInputs {
    fn from(inputs: BrrInputs) -> Self {
        StrategyInputs::Brr(inputs)
    }
}

impl From<HmoInputs> for StrategyInputs {
    fn from(inputs: HmoInputs) -> Self {
        StrategyInputs::Hmo(inputs)
    }
}

impl From<FlipInputs> for StrategyInputs {
    fn from(inputs: FlipInputs) -> Self {
        StrategyInputs::Flip(inputs)
    }
}

/// Result for any strategy, tagged the same way as its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum CalculationResult {
    Btl(BtlResult),
    Brr(BrrResult),
    Hmo(HmoResult),
    Flip(FlipResult),
}

impl CalculationResult {
    pub fn strategy(&self) -> Strategy {
        match self {
            CalculationResult::Btl(_) => Strategy::Btl,
            CalculationResult::Brr(_) => Strategy::Brr,
            CalculationResult::Hmo(_) => Strategy::Hmo,
            CalculationResult::Flip(_) => Strategy::Flip,
        }
    }
}

/// Run the model matching the inputs' strategy. Pure: no timing, no warnings.
pub fn compute(inputs: &StrategyInputs) -> PropertyReturnsResult<CalculationResult> {
    Ok(match inputs {
        StrategyInputs::Btl(i) => CalculationResult::Btl(btl::compute_btl(i)?),
        StrategyInputs::Brr(i) => CalculationResult::Brr(brr::compute_brr(i)?),
        StrategyInputs::Hmo(i) => CalculationResult::Hmo(hmo::compute_hmo(i)?),
        StrategyInputs::Flip(i) => CalculationResult::Flip(flip::compute_flip(i)?),
    })
}

/// Compute and wrap in the standard output envelope with warnings.
pub fn analyse(
    inputs: &StrategyInputs,
) -> PropertyReturnsResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();

    let (result, warnings) = match inputs {
        StrategyInputs::Btl(i) => {
            let r = btl::compute_btl(i)?;
            let w = btl::warnings(i, &r);
            (CalculationResult::Btl(r), w)
        }
        StrategyInputs::Brr(i) => {
            let r = brr::compute_brr(i)?;
            let w = brr::warnings(i, &r);
            (CalculationResult::Brr(r), w)
        }
        StrategyInputs::Hmo(i) => {
            let r = hmo::compute_hmo(i)?;
            let w = hmo::warnings(i, &r);
            (CalculationResult::Hmo(r), w)
        }
        StrategyInputs::Flip(i) => {
            let r = flip::compute_flip(i)?;
            let w = flip::warnings(i, &r);
            (CalculationResult::Flip(r), w)
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        inputs.strategy().methodology(),
        inputs,
        warnings,
        elapsed,
        result,
    ))
}
