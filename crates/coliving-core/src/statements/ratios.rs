use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance_sheet::BalanceSheetRow;
use super::income::ebitda_margin;
use crate::config::ModelConfig;
use crate::projection::ScenarioResult;
use crate::types::Rate;

/// Headline ratios of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRatios {
    pub irr: Option<Rate>,
    pub ebitda_margin_year1: Option<Rate>,
    /// Over the years with debt service only
    pub min_dscr: Option<Decimal>,
    pub avg_dscr: Option<Decimal>,
    pub initial_ltv: Rate,
    pub final_ltv: Option<Rate>,
}

pub fn key_ratios(
    config: &ModelConfig,
    result: &ScenarioResult,
    balance_sheet: &[BalanceSheetRow],
) -> KeyRatios {
    let dscrs: Vec<Decimal> = result
        .year_projections
        .iter()
        .filter_map(|y| y.dscr)
        .collect();

    let min_dscr = dscrs.iter().copied().min();
    let avg_dscr = if dscrs.is_empty() {
        None
    } else {
        dscrs
            .iter()
            .copied()
            .sum::<Decimal>()
            .checked_div(Decimal::from(dscrs.len()))
    };

    KeyRatios {
        irr: result.irr,
        ebitda_margin_year1: ebitda_margin(result),
        min_dscr,
        avg_dscr,
        initial_ltv: config.financing.debt_ratio,
        final_ltv: balance_sheet.last().and_then(|row| row.ltv),
    }
}
