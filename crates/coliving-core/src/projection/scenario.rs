use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::years::{project_years, TerminalSale, YearProjection};
use crate::config::ModelConfig;
use crate::financing::amortization::AmortizationSchedule;
use crate::revenue::aggregation::{simulate_annual_revenue, RevenueBreakdown, Season};
use crate::revenue::grid::SeasonGrid;
use crate::time_value::{irr, IrrSettings};
use crate::types::{Money, Rate};

/// Multipliers a scenario applies to base occupancy, prices and costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFactors {
    pub occ_factor: Decimal,
    pub price_factor: Decimal,
    pub cost_factor: Decimal,
}

impl ScenarioFactors {
    /// Factors that leave the base case unchanged.
    pub fn neutral() -> Self {
        Self {
            occ_factor: Decimal::ONE,
            price_factor: Decimal::ONE,
            cost_factor: Decimal::ONE,
        }
    }
}

impl Default for ScenarioFactors {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Everything computed for one named scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub factors: ScenarioFactors,
    pub revenue: RevenueBreakdown,
    pub revenue_year1: Money,
    /// Fixed costs after the cost factor
    pub fixed_costs_year1: Money,
    /// Variable costs after the cost factor
    pub variable_costs_year1: Money,
    pub costs_year1: Money,
    pub ebitda_year1: Money,
    /// Index 0 is the equity outlay (negative), then one FCFE per year
    pub cashflow_series: Vec<Money>,
    /// `None` when the cash flows never change sign
    pub irr: Option<Rate>,
    pub year_projections: Vec<YearProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_sale: Option<TerminalSale>,
}

/// Scenario view of the base grid: occupancy scaled by `occ_factor` and
/// capped at 1, every tenor price scaled by `price_factor`.
pub fn scale_seasons(grid: &SeasonGrid, factors: &ScenarioFactors) -> Vec<Season> {
    grid.iter()
        .map(|(name, season)| {
            let mut occupancy = IndexMap::with_capacity(season.rooms.len());
            let mut pricing = IndexMap::with_capacity(season.rooms.len());

            for (room_type, cell) in &season.rooms {
                let occ = (cell.occupancy_base * factors.occ_factor).min(Decimal::ONE);
                occupancy.insert(room_type.clone(), occ);
                pricing.insert(
                    room_type.clone(),
                    cell.pricing().scale_prices(factors.price_factor),
                );
            }

            Season {
                name: name.clone(),
                days: season.days,
                occupancy,
                pricing,
            }
        })
        .collect()
}

/// Revenue a scenario earns in year 1.
pub fn scenario_revenue_breakdown(config: &ModelConfig, factors: &ScenarioFactors) -> RevenueBreakdown {
    let seasons = scale_seasons(&config.seasons, factors);
    simulate_annual_revenue(&config.room_inventory(), &seasons)
}

/// Project one scenario over the full horizon.
///
/// `schedule` is the loan schedule shared by every scenario of the run. The
/// configuration is taken as already validated.
pub fn project_scenario(
    config: &ModelConfig,
    name: &str,
    factors: &ScenarioFactors,
    schedule: &AmortizationSchedule,
) -> ScenarioResult {
    let revenue = scenario_revenue_breakdown(config, factors);
    let revenue_year1 = revenue.total_revenue;

    // Cost factor scales fixed and variable costs alike.
    let fixed_costs = config.fixed_costs_total();
    let variable_costs = revenue_year1 * config.charges.variable_cost_rate;
    let costs_year1 = (fixed_costs + variable_costs) * factors.cost_factor;
    let ebitda_year1 = revenue_year1 - costs_year1;

    let projection = project_years(config, ebitda_year1, schedule);

    let mut cashflow_series = Vec::with_capacity(projection.years.len() + 1);
    cashflow_series.push(-config.equity_amount());
    cashflow_series.extend(projection.years.iter().map(|y| y.fcfe));

    let irr = irr(&cashflow_series, &IrrSettings::default());
    debug!(
        scenario = name,
        revenue = %revenue_year1,
        ebitda = %ebitda_year1,
        irr = ?irr,
        "scenario projected"
    );

    ScenarioResult {
        name: name.to_string(),
        factors: factors.clone(),
        revenue,
        revenue_year1,
        fixed_costs_year1: fixed_costs * factors.cost_factor,
        variable_costs_year1: variable_costs * factors.cost_factor,
        costs_year1,
        ebitda_year1,
        cashflow_series,
        irr,
        year_projections: projection.years,
        terminal_sale: projection.terminal_sale,
    }
}
