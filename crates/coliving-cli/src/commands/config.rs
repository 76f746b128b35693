use clap::Args;
use serde_json::Value;

use coliving_core::config::{validate_config, ModelConfig};

use crate::input;

/// Arguments for printing the effective configuration
#[derive(Args)]
pub struct DefaultConfigArgs {
    /// Overlay to merge before printing (shows the effective configuration)
    #[arg(long)]
    pub input: Option<String>,

    /// Print YAML instead of the selected output format
    #[arg(long)]
    pub yaml: bool,
}

/// Returns `None` when the configuration was already written as YAML.
pub fn run_default_config(
    args: DefaultConfigArgs,
) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let config = match args.input {
        Some(ref path) => input::load_config(Some(path))?,
        None => ModelConfig::default(),
    };
    // Fail early on an overlay the engine would reject
    validate_config(&config)?;

    if args.yaml {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(None);
    }
    Ok(Some(serde_json::to_value(config)?))
}
