use clap::Args;
use serde_json::Value;

use coliving_core::projection::simulation;

use crate::input;

/// Arguments for a full multi-scenario run
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a JSON or YAML configuration overlay (defaults when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Keep only this scenario in the output
    #[arg(long)]
    pub scenario: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut config = input::load_config(args.input.as_deref())?;
    if let Some(ref name) = args.scenario {
        let factors = config
            .scenarios
            .get(name)
            .cloned()
            .ok_or_else(|| format!("Unknown scenario '{}'", name))?;
        config.scenarios.clear();
        config.scenarios.insert(name.clone(), factors);
    }

    let result = simulation::run_simulation(&config)?;
    Ok(serde_json::to_value(result)?)
}
