use clap::Args;
use serde_json::Value;

use coliving_core::projection::simulation;

use crate::input;

/// Arguments for the year-1 revenue breakdown
#[derive(Args)]
pub struct RevenueArgs {
    /// Path to a JSON or YAML configuration overlay (defaults when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario to price (all scenarios when omitted)
    #[arg(long)]
    pub scenario: Option<String>,
}

pub fn run_revenue(args: RevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::load_config(args.input.as_deref())?;
    let result = simulation::scenario_revenue(&config, args.scenario.as_deref())?;
    Ok(serde_json::to_value(result)?)
}
