use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projection::scenario::ScenarioFactors;
use crate::revenue::aggregation::RoomType;
use crate::revenue::grid::SeasonGrid;
use crate::types::{Money, Multiple, Rate};

/// Complete set of assumptions for one property model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Room type name -> number of rooms, in reporting order
    pub room_types: IndexMap<String, u32>,
    pub charges: Charges,
    pub tax: TaxAssumptions,
    pub financing: FinancingAssumptions,
    /// Scenario name -> factors applied to the base case
    pub scenarios: IndexMap<String, ScenarioFactors>,
    pub seasons: SeasonGrid,
}

/// Operating costs at base case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charges {
    /// Fixed annual cost line items (staff, energy, maintenance, ...)
    pub fixed: IndexMap<String, Money>,
    /// Variable costs as a share of revenue
    pub variable_cost_rate: Rate,
}

/// Corporate tax and book depreciation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAssumptions {
    pub tax_rate: Rate,
    /// Share of the investment that is depreciable (buildings, fit-out)
    pub amortizable_share: Rate,
    /// Straight-line depreciation period
    pub deprec_years: u32,
}

/// Acquisition, debt, growth and exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingAssumptions {
    pub total_investment: Money,
    /// Debt as a share of total investment (LTV at entry)
    pub debt_ratio: Rate,
    pub interest_rate: Rate,
    pub loan_years: u32,
    pub horizon_years: u32,
    /// Annual EBITDA growth after year 1
    pub growth_rate: Rate,
    /// Sale price as a multiple of final-year EBITDA
    pub exit_multiple: Multiple,
    /// Transaction costs on sale, as a share of sale price
    pub exit_cost_rate: Rate,
}

impl ModelConfig {
    pub fn room_inventory(&self) -> Vec<RoomType> {
        self.room_types
            .iter()
            .map(|(name, count)| RoomType {
                name: name.clone(),
                count: *count,
            })
            .collect()
    }

    pub fn fixed_costs_total(&self) -> Money {
        self.charges.fixed.values().copied().sum()
    }

    pub fn debt_amount(&self) -> Money {
        self.financing.total_investment * self.financing.debt_ratio
    }

    pub fn equity_amount(&self) -> Money {
        self.financing.total_investment * (Decimal::ONE - self.financing.debt_ratio)
    }

    pub fn amortizable_base(&self) -> Money {
        self.financing.total_investment * self.tax.amortizable_share
    }

    /// Straight-line book depreciation; zero when no period is set.
    pub fn annual_depreciation(&self) -> Money {
        if self.tax.deprec_years == 0 {
            return Decimal::ZERO;
        }
        self.amortizable_base() / Decimal::from(self.tax.deprec_years)
    }
}
