use clap::Args;
use serde_json::Value;

use coliving_core::projection::simulation;
use coliving_core::statements;

use crate::input;

/// Arguments for the P&L, balance sheet and ratio pack
#[derive(Args)]
pub struct StatementsArgs {
    /// Path to a JSON or YAML configuration overlay (defaults when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_statements(args: StatementsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::load_config(args.input.as_deref())?;
    let run = simulation::run_simulation(&config)?;
    let mut result = statements::build_statements(&config, &run.result)?;

    // Projection warnings still apply to the statements
    let mut warnings = run.warnings;
    warnings.append(&mut result.warnings);
    result.warnings = warnings;

    Ok(serde_json::to_value(result)?)
}
