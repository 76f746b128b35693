use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, debug_span};

use super::scenario::{project_scenario, scenario_revenue_breakdown, ScenarioFactors, ScenarioResult};
use crate::config::{validate_config, ModelConfig};
use crate::error::ColivingError;
use crate::financing::amortization::{AmortizationRow, AmortizationSchedule};
use crate::revenue::aggregation::RevenueBreakdown;
use crate::types::*;
use crate::ColivingResult;

/// DSCR below this level is reported as a covenant risk.
const DSCR_WARNING_THRESHOLD: Decimal = dec!(1.20);
/// Entry leverage above this level is reported as aggressive.
const LTV_WARNING_THRESHOLD: Decimal = dec!(0.80);

/// Output of a full multi-scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub debt_amount: Money,
    pub equity_amount: Money,
    pub annual_depreciation: Money,
    /// Loan schedule shared by every scenario
    pub amortization: Vec<AmortizationRow>,
    /// One result per configured scenario, in configuration order
    pub scenarios: Vec<ScenarioResult>,
}

impl SimulationOutput {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

/// Year-1 revenue of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRevenue {
    pub scenario: String,
    pub factors: ScenarioFactors,
    pub revenue: RevenueBreakdown,
}

/// Validate `config`, then project every scenario over the horizon.
///
/// The amortization schedule is built once and read by every scenario.
pub fn run_simulation(config: &ModelConfig) -> ColivingResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings = validate_config(config)?;

    let fin = &config.financing;
    let schedule =
        AmortizationSchedule::build(config.debt_amount(), fin.interest_rate, fin.loan_years);
    debug!(
        debt = %config.debt_amount(),
        rows = schedule.len(),
        payment = %schedule.annual_payment(),
        "amortization schedule built"
    );

    if fin.debt_ratio > LTV_WARNING_THRESHOLD {
        warnings.push(format!(
            "High leverage: LTV at entry is {:.1}%",
            fin.debt_ratio * dec!(100)
        ));
    }

    let mut scenarios = Vec::with_capacity(config.scenarios.len());
    for (name, factors) in &config.scenarios {
        let span = debug_span!("scenario", scenario = name.as_str());
        let _enter = span.enter();

        let result = project_scenario(config, name, factors, &schedule);
        scenario_warnings(&result, &mut warnings);
        scenarios.push(result);
    }

    let output = SimulationOutput {
        debt_amount: config.debt_amount(),
        equity_amount: config.equity_amount(),
        annual_depreciation: config.annual_depreciation(),
        amortization: schedule.into_rows(),
        scenarios,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Seasonal revenue model with constant-annuity debt, straight-line depreciation and FCFE/IRR at exit multiple",
        &serde_json::json!({
            "total_investment": fin.total_investment.to_string(),
            "debt_ratio": fin.debt_ratio.to_string(),
            "interest_rate": fin.interest_rate.to_string(),
            "loan_years": fin.loan_years,
            "horizon_years": fin.horizon_years,
            "growth_rate": fin.growth_rate.to_string(),
            "exit_multiple": fin.exit_multiple.to_string(),
            "scenarios": config.scenarios.keys().collect::<Vec<_>>(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn scenario_warnings(result: &ScenarioResult, warnings: &mut Vec<String>) {
    let name = &result.name;

    if result.irr.is_none() {
        warnings.push(format!(
            "{name}: IRR undefined (cash flows never change sign)"
        ));
    }
    if result.ebitda_year1 < Decimal::ZERO {
        warnings.push(format!(
            "{name}: negative year-1 EBITDA ({})",
            result.ebitda_year1.round_dp(2)
        ));
    }

    let breaches: Vec<String> = result
        .year_projections
        .iter()
        .filter(|y| y.dscr.is_some_and(|d| d < DSCR_WARNING_THRESHOLD))
        .map(|y| y.year.to_string())
        .collect();
    if !breaches.is_empty() {
        warnings.push(format!(
            "{name}: DSCR below {DSCR_WARNING_THRESHOLD}x in year(s) {}",
            breaches.join(", ")
        ));
    }
}

/// Year-1 revenue breakdown for one named scenario, or for all of them.
pub fn scenario_revenue(
    config: &ModelConfig,
    scenario: Option<&str>,
) -> ColivingResult<ComputationOutput<Vec<ScenarioRevenue>>> {
    let start = Instant::now();
    let warnings = validate_config(config)?;

    let selected: IndexMap<&String, &ScenarioFactors> = match scenario {
        Some(wanted) => {
            let (name, factors) = config.scenarios.get_key_value(wanted).ok_or_else(|| {
                ColivingError::InvalidInput {
                    field: "scenario".into(),
                    reason: format!("Unknown scenario '{wanted}'"),
                }
            })?;
            IndexMap::from([(name, factors)])
        }
        None => config.scenarios.iter().collect(),
    };

    let output: Vec<ScenarioRevenue> = selected
        .into_iter()
        .map(|(name, factors)| ScenarioRevenue {
            scenario: name.clone(),
            factors: factors.clone(),
            revenue: scenario_revenue_breakdown(config, factors),
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Seasonal revenue: rooms x days x occupancy x blended nightly rate",
        &serde_json::json!({
            "scenario": scenario,
            "room_types": config.room_types,
            "seasons": config.seasons.iter().map(|(n, s)| (n, s.days)).collect::<IndexMap<_, _>>(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
