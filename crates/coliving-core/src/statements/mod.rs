//! Reporting views derived from a finished simulation run.

pub mod balance_sheet;
pub mod income;
pub mod ratios;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ModelConfig;
use crate::error::ColivingError;
use crate::projection::{ScenarioFactors, ScenarioResult, SimulationOutput};
use crate::types::*;
use crate::ColivingResult;

pub use balance_sheet::{balance_sheet, BalanceSheetRow};
pub use income::{ebitda_margin, income_statement, IncomeStatementRow};
pub use ratios::{key_ratios, KeyRatios};

/// Flat revenue line for tabular export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueDetailRow {
    pub season: String,
    pub room_type: String,
    pub revenue: Money,
    pub occupancy_rate: Rate,
    pub occupied_nights: Decimal,
    pub equivalent_nightly_rate: Money,
}

/// Year-1 headline figures of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummaryRow {
    pub scenario: String,
    pub revenue_year1: Money,
    pub ebitda_year1: Money,
    pub costs_year1: Money,
    pub irr: Option<Rate>,
    pub occ_factor: Decimal,
    pub price_factor: Decimal,
    pub cost_factor: Decimal,
}

/// Full statement pack of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStatements {
    pub scenario: String,
    pub income_statement: Vec<IncomeStatementRow>,
    pub balance_sheet: Vec<BalanceSheetRow>,
    pub ratios: KeyRatios,
    pub revenue_detail: Vec<RevenueDetailRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementsOutput {
    pub summary: Vec<ScenarioSummaryRow>,
    pub scenarios: Vec<ScenarioStatements>,
}

pub fn revenue_detail(result: &ScenarioResult) -> Vec<RevenueDetailRow> {
    result
        .revenue
        .per_season
        .iter()
        .flat_map(|season| {
            season.by_room_type.iter().map(move |line| RevenueDetailRow {
                season: season.season.clone(),
                room_type: line.room_type.clone(),
                revenue: line.revenue,
                occupancy_rate: line.occupancy_rate,
                occupied_nights: line.occupied_nights,
                equivalent_nightly_rate: line.equivalent_nightly_rate,
            })
        })
        .collect()
}

pub fn scenario_summary(results: &[ScenarioResult]) -> Vec<ScenarioSummaryRow> {
    results
        .iter()
        .map(|r| {
            let ScenarioFactors {
                occ_factor,
                price_factor,
                cost_factor,
            } = r.factors;
            ScenarioSummaryRow {
                scenario: r.name.clone(),
                revenue_year1: r.revenue_year1,
                ebitda_year1: r.ebitda_year1,
                costs_year1: r.costs_year1,
                irr: r.irr,
                occ_factor,
                price_factor,
                cost_factor,
            }
        })
        .collect()
}

/// Build P&L, balance sheet, ratios and revenue detail for every scenario of
/// a run, plus a cross-scenario summary.
///
/// `config` must be the configuration `simulation` was produced from.
pub fn build_statements(
    config: &ModelConfig,
    simulation: &SimulationOutput,
) -> ColivingResult<ComputationOutput<StatementsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if simulation.scenarios.is_empty() {
        return Err(ColivingError::InsufficientData(
            "Simulation contains no scenarios".into(),
        ));
    }
    let horizon = config.financing.horizon_years as usize;
    if let Some(bad) = simulation
        .scenarios
        .iter()
        .find(|s| s.year_projections.len() != horizon)
    {
        return Err(ColivingError::InvalidInput {
            field: "simulation".into(),
            reason: format!(
                "Scenario '{}' has {} projection years but the configured horizon is {horizon}",
                bad.name,
                bad.year_projections.len()
            ),
        });
    }

    let scenarios: Vec<ScenarioStatements> = simulation
        .scenarios
        .iter()
        .map(|result| {
            let balance_sheet = balance_sheet(config, result);
            let ratios = key_ratios(config, result, &balance_sheet);
            if ratios.ebitda_margin_year1.map_or(true, |m| m <= Decimal::ZERO) {
                warnings.push(format!(
                    "{}: non-positive EBITDA margin, projected revenue shown as zero",
                    result.name
                ));
            }
            ScenarioStatements {
                scenario: result.name.clone(),
                income_statement: income_statement(result),
                balance_sheet,
                ratios,
                revenue_detail: revenue_detail(result),
            }
        })
        .collect();

    let output = StatementsOutput {
        summary: scenario_summary(&simulation.scenarios),
        scenarios,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simplified P&L, balance sheet and coverage ratios",
        &serde_json::json!({
            "total_investment": config.financing.total_investment.to_string(),
            "amortizable_share": config.tax.amortizable_share.to_string(),
            "deprec_years": config.tax.deprec_years,
            "pnl_revenue": "EBITDA / year-1 EBITDA margin",
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::run_simulation;
    use rust_decimal_macros::dec;

    #[test]
    fn test_statement_pack_shape() {
        let cfg = ModelConfig::default();
        let sim = run_simulation(&cfg).unwrap().result;
        let out = build_statements(&cfg, &sim).unwrap();

        assert_eq!(out.result.summary.len(), 3);
        assert_eq!(out.result.scenarios.len(), 3);
        for pack in &out.result.scenarios {
            assert_eq!(pack.income_statement.len(), 15);
            assert_eq!(pack.balance_sheet.len(), 15);
            // 3 seasons x 4 room types
            assert_eq!(pack.revenue_detail.len(), 12);
        }
        // Built-in scenarios all run at a loss
        assert_eq!(out.warnings.len(), 3);
    }

    #[test]
    fn test_revenue_detail_sums_to_total() {
        let cfg = ModelConfig::default();
        let sim = run_simulation(&cfg).unwrap().result;
        let base = &sim.scenarios[0];

        let rows = revenue_detail(base);
        let total: Decimal = rows.iter().map(|r| r.revenue).sum();
        assert!((total - base.revenue_year1).abs() < dec!(0.000001));
        assert_eq!(rows[0].season, "High season winter");
        assert_eq!(rows[0].room_type, "premium_room");
    }

    #[test]
    fn test_summary_carries_factors() {
        let cfg = ModelConfig::default();
        let sim = run_simulation(&cfg).unwrap().result;
        let summary = scenario_summary(&sim.scenarios);

        assert_eq!(summary[1].scenario, "Optimistic");
        assert_eq!(summary[1].occ_factor, dec!(1.10));
        assert_eq!(summary[2].cost_factor, dec!(1.05));
        assert_eq!(summary[0].revenue_year1, sim.scenarios[0].revenue_year1);
    }

    #[test]
    fn test_mismatched_config_rejected() {
        let cfg = ModelConfig::default();
        let sim = run_simulation(&cfg).unwrap().result;

        let mut other = cfg.clone();
        other.financing.horizon_years = 10;
        assert!(build_statements(&other, &sim).is_err());
    }
}
