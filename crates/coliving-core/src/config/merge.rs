//! Partial configurations layered onto a complete [`ModelConfig`].
//!
//! Every overlay field is optional. Keyed tables (room types, cost items,
//! scenarios, seasons and their room cells) merge entry by entry: existing
//! entries are updated field by field, new entries are inserted with any
//! unspecified field taking its neutral value.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::model::ModelConfig;
use crate::projection::scenario::ScenarioFactors;
use crate::revenue::grid::{RoomSeasonAssumption, SeasonAssumption};
use crate::types::{Money, Multiple, Rate};

/// Season length used when an overlay introduces a season without `days`.
pub const DEFAULT_SEASON_DAYS: u32 = 90;

/// A partial update for one node of the configuration tree.
pub trait Overlay {
    type Target;

    /// Overwrite the fields this overlay sets.
    fn apply_to(self, target: &mut Self::Target);

    /// Build a node from scratch for a key the target does not have yet.
    fn into_new(self) -> Self::Target;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverlay {
    pub room_types: IndexMap<String, u32>,
    pub charges: Option<ChargesOverlay>,
    pub tax: Option<TaxOverlay>,
    pub financing: Option<FinancingOverlay>,
    pub scenarios: IndexMap<String, ScenarioFactorsOverlay>,
    pub seasons: IndexMap<String, SeasonOverlay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargesOverlay {
    pub fixed: IndexMap<String, Money>,
    pub variable_cost_rate: Option<Rate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxOverlay {
    pub tax_rate: Option<Rate>,
    pub amortizable_share: Option<Rate>,
    pub deprec_years: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancingOverlay {
    pub total_investment: Option<Money>,
    pub debt_ratio: Option<Rate>,
    pub interest_rate: Option<Rate>,
    pub loan_years: Option<u32>,
    pub horizon_years: Option<u32>,
    pub growth_rate: Option<Rate>,
    pub exit_multiple: Option<Multiple>,
    pub exit_cost_rate: Option<Rate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFactorsOverlay {
    pub occ_factor: Option<Decimal>,
    pub price_factor: Option<Decimal>,
    pub cost_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeasonOverlay {
    pub days: Option<u32>,
    pub rooms: IndexMap<String, RoomSeasonOverlay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomSeasonOverlay {
    pub occupancy_base: Option<Rate>,
    pub price_per_night: Option<Money>,
    pub price_per_week: Option<Money>,
    pub price_per_month: Option<Money>,
    pub share_nightly: Option<Decimal>,
    pub share_weekly: Option<Decimal>,
    pub share_monthly: Option<Decimal>,
}

impl ModelConfig {
    /// Deep-merge `overlay` into this configuration.
    pub fn merge(&mut self, overlay: ConfigOverlay) {
        for (name, count) in overlay.room_types {
            self.room_types.insert(name, count);
        }
        if let Some(charges) = overlay.charges {
            for (item, amount) in charges.fixed {
                self.charges.fixed.insert(item, amount);
            }
            set(&mut self.charges.variable_cost_rate, charges.variable_cost_rate);
        }
        if let Some(tax) = overlay.tax {
            set(&mut self.tax.tax_rate, tax.tax_rate);
            set(&mut self.tax.amortizable_share, tax.amortizable_share);
            set(&mut self.tax.deprec_years, tax.deprec_years);
        }
        if let Some(fin) = overlay.financing {
            let target = &mut self.financing;
            set(&mut target.total_investment, fin.total_investment);
            set(&mut target.debt_ratio, fin.debt_ratio);
            set(&mut target.interest_rate, fin.interest_rate);
            set(&mut target.loan_years, fin.loan_years);
            set(&mut target.horizon_years, fin.horizon_years);
            set(&mut target.growth_rate, fin.growth_rate);
            set(&mut target.exit_multiple, fin.exit_multiple);
            set(&mut target.exit_cost_rate, fin.exit_cost_rate);
        }
        merge_keyed(&mut self.scenarios, overlay.scenarios);
        merge_keyed(self.seasons.as_map_mut(), overlay.seasons);
    }

    /// Built-in defaults with `overlay` merged on top.
    pub fn from_overlay(overlay: ConfigOverlay) -> Self {
        let mut config = ModelConfig::default();
        config.merge(overlay);
        config
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn merge_keyed<O: Overlay>(target: &mut IndexMap<String, O::Target>, overlay: IndexMap<String, O>) {
    for (key, node) in overlay {
        match target.get_mut(&key) {
            Some(existing) => node.apply_to(existing),
            None => {
                target.insert(key, node.into_new());
            }
        }
    }
}

impl Overlay for ScenarioFactorsOverlay {
    type Target = ScenarioFactors;

    fn apply_to(self, target: &mut ScenarioFactors) {
        set(&mut target.occ_factor, self.occ_factor);
        set(&mut target.price_factor, self.price_factor);
        set(&mut target.cost_factor, self.cost_factor);
    }

    fn into_new(self) -> ScenarioFactors {
        let mut factors = ScenarioFactors::neutral();
        self.apply_to(&mut factors);
        factors
    }
}

impl Overlay for SeasonOverlay {
    type Target = SeasonAssumption;

    fn apply_to(self, target: &mut SeasonAssumption) {
        set(&mut target.days, self.days);
        merge_keyed(&mut target.rooms, self.rooms);
    }

    fn into_new(self) -> SeasonAssumption {
        let mut season = SeasonAssumption {
            days: DEFAULT_SEASON_DAYS,
            rooms: IndexMap::new(),
        };
        self.apply_to(&mut season);
        season
    }
}

impl Overlay for RoomSeasonOverlay {
    type Target = RoomSeasonAssumption;

    fn apply_to(self, target: &mut RoomSeasonAssumption) {
        set(&mut target.occupancy_base, self.occupancy_base);
        set(&mut target.price_per_night, self.price_per_night);
        set(&mut target.price_per_week, self.price_per_week);
        set(&mut target.price_per_month, self.price_per_month);
        set(&mut target.share_nightly, self.share_nightly);
        set(&mut target.share_weekly, self.share_weekly);
        set(&mut target.share_monthly, self.share_monthly);
    }

    fn into_new(self) -> RoomSeasonAssumption {
        let mut cell = RoomSeasonAssumption {
            occupancy_base: Decimal::ZERO,
            price_per_night: Decimal::ZERO,
            price_per_week: Decimal::ZERO,
            price_per_month: Decimal::ZERO,
            share_nightly: Decimal::ZERO,
            share_weekly: Decimal::ZERO,
            share_monthly: Decimal::ZERO,
        };
        self.apply_to(&mut cell);
        cell
    }
}
