use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use coliving_core::time_value::{self, IrrInput, IrrSettings};

use crate::input;

/// Arguments for an IRR calculation
#[derive(Args)]
pub struct IrrArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual cash flows (comma-separated, e.g. "-100,60,60")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// Maximum bisection iterations
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let irr_input: IrrInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        let cash_flows = args
            .cash_flows
            .ok_or("--cash-flows is required (or provide --input)")?;
        let mut settings = IrrSettings::default();
        if let Some(n) = args.max_iterations {
            settings.max_iterations = n;
        }
        IrrInput {
            cash_flows,
            settings,
        }
    };

    let result = time_value::irr_analysis(&irr_input)?;
    Ok(serde_json::to_value(result)?)
}
