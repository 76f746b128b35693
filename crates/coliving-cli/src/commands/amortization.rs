use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use coliving_core::financing::amortization::{self, AmortizationInput};

use crate::input;

/// Arguments for a standalone loan schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub debt_amount: Option<Decimal>,

    /// Annual interest rate as a decimal (0.03 = 3%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_years: Option<u32>,
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: AmortizationInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(loan) = input::stdin::read_piped()? {
        loan
    } else {
        AmortizationInput {
            debt_amount: args
                .debt_amount
                .ok_or("--debt-amount is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            loan_years: args
                .loan_years
                .ok_or("--loan-years is required (or provide --input)")?,
        }
    };

    let result = amortization::amortization_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}
