mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;

use commands::amortization::AmortizationArgs;
use commands::config::DefaultConfigArgs;
use commands::irr::IrrArgs;
use commands::revenue::RevenueArgs;
use commands::simulate::SimulateArgs;
use commands::statements::StatementsArgs;

/// Scenario projections for coliving and short-term-rental properties
#[derive(Parser)]
#[command(
    name = "coliving",
    version,
    about = "Scenario projections for coliving and short-term-rental properties",
    long_about = "Projects seasonal revenue, debt service, tax, free cash flow to equity, \
                  IRR and DSCR across named scenarios with decimal precision. Configuration \
                  files (JSON or YAML) are merged onto the built-in assumptions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project every scenario: revenue, debt, FCFE, IRR and DSCR
    Simulate(SimulateArgs),
    /// Year-1 revenue by season and room type
    Revenue(RevenueArgs),
    /// Constant-annuity loan schedule
    Amortization(AmortizationArgs),
    /// Internal rate of return of a cash-flow series
    Irr(IrrArgs),
    /// P&L, balance sheet, ratios and scenario summary
    Statements(StatementsArgs),
    /// Print the built-in (or merged) configuration
    DefaultConfig(DefaultConfigArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Revenue(args) => commands::revenue::run_revenue(args),
        Commands::Amortization(args) => commands::amortization::run_amortization(args),
        Commands::Irr(args) => commands::irr::run_irr(args),
        Commands::Statements(args) => commands::statements::run_statements(args),
        Commands::DefaultConfig(args) => match commands::config::run_default_config(args) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => return,
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("coliving {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
