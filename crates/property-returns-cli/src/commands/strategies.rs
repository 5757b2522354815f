use clap::Args;
use serde_json::Value;

use property_returns_core::scenario::Scenario;
use property_returns_core::strategies::brr::BrrInputs;
use property_returns_core::strategies::btl::BtlInputs;
use property_returns_core::strategies::flip::FlipInputs;
use property_returns_core::strategies::hmo::HmoInputs;
use property_returns_core::{analyse, StrategyInputs};

use crate::input;

/// Arguments shared by every strategy model
#[derive(Args)]
pub struct StrategyArgs {
    /// Path to JSON or YAML input file (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_btl(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: BtlInputs = input::read_input(args.input.as_deref(), "buy-to-let")?;
    run(inputs.into())
}

pub fn run_brr(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: BrrInputs = input::read_input(args.input.as_deref(), "BRR")?;
    run(inputs.into())
}

pub fn run_hmo(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: HmoInputs = input::read_input(args.input.as_deref(), "HMO")?;
    run(inputs.into())
}

pub fn run_flip(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: FlipInputs = input::read_input(args.input.as_deref(), "flip")?;
    run(inputs.into())
}

/// Any strategy, selected by the `"strategy"` field of the input.
pub fn run_analyse(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: StrategyInputs = input::read_input(args.input.as_deref(), "analyse")?;
    run(inputs)
}

/// Re-run a saved scenario.
pub fn run_scenario(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario: Scenario = input::read_input(args.input.as_deref(), "scenario")?;
    log::info!(
        "evaluating scenario {} ({}) saved {}",
        scenario.id,
        scenario.strategy(),
        scenario.created_at
    );

    let mut value = run(scenario.inputs.clone())?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "scenario".into(),
            serde_json::json!({
                "id": scenario.id,
                "name": scenario.name,
                "createdAt": scenario.created_at,
            }),
        );
    }
    Ok(value)
}

fn run(inputs: StrategyInputs) -> Result<Value, Box<dyn std::error::Error>> {
    log::debug!("running {} model", inputs.strategy());
    let output = analyse(&inputs)?;
    for warning in &output.warnings {
        log::debug!("warning: {warning}");
    }
    Ok(serde_json::to_value(output)?)
}
