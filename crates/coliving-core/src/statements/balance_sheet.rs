use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::projection::ScenarioResult;
use crate::types::{Money, Rate};

/// End-of-year simplified balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRow {
    pub year: u32,
    pub accumulated_depreciation: Money,
    /// Depreciable base net of accumulated depreciation, floored at zero
    pub net_amortizable: Money,
    /// Non-depreciable share of the investment plus the net depreciable base
    pub net_fixed_assets: Money,
    pub bank_debt: Money,
    /// Fixed assets less bank debt
    pub book_equity: Money,
    /// `None` once fixed assets are written down to nothing
    pub ltv: Option<Rate>,
}

/// Asset-side view from straight-line depreciation, liability side from the
/// projected remaining debt.
pub fn balance_sheet(config: &ModelConfig, result: &ScenarioResult) -> Vec<BalanceSheetRow> {
    let depreciation = config.annual_depreciation();
    let amortizable_base = config.amortizable_base();
    let land = config.financing.total_investment * (Decimal::ONE - config.tax.amortizable_share);
    let deprec_years = config.tax.deprec_years;

    result
        .year_projections
        .iter()
        .map(|y| {
            let accumulated = depreciation * Decimal::from(y.year.min(deprec_years));
            let net_amortizable = (amortizable_base - accumulated).max(Decimal::ZERO);
            let net_fixed_assets = land + net_amortizable;
            let bank_debt = y.remaining_debt;
            let ltv = if net_fixed_assets > Decimal::ZERO {
                bank_debt.checked_div(net_fixed_assets)
            } else {
                None
            };

            BalanceSheetRow {
                year: y.year,
                accumulated_depreciation: accumulated,
                net_amortizable,
                net_fixed_assets,
                bank_debt,
                book_equity: net_fixed_assets - bank_debt,
                ltv,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::run_simulation;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_balance_sheet() {
        let cfg = ModelConfig::default();
        let sim = run_simulation(&cfg).unwrap().result;
        let rows = balance_sheet(&cfg, &sim.scenarios[0]);

        assert_eq!(rows.len(), 15);
        let y1 = &rows[0];
        assert_eq!(y1.accumulated_depreciation, dec!(144000));
        assert_eq!(y1.net_amortizable, dec!(3456000));
        // 900k land + 3.456M net building
        assert_eq!(y1.net_fixed_assets, dec!(4356000));
        assert_eq!(y1.book_equity, y1.net_fixed_assets - y1.bank_debt);

        let last = rows.last().unwrap();
        assert_eq!(last.accumulated_depreciation, dec!(2160000));
        assert!(last.bank_debt < dec!(0.001));
        assert!(last.ltv.unwrap() < dec!(0.000001));
    }

    #[test]
    fn test_depreciation_stops_at_period() {
        let mut cfg = ModelConfig::default();
        cfg.tax.deprec_years = 5;
        let sim = run_simulation(&cfg).unwrap().result;
        let rows = balance_sheet(&cfg, &sim.scenarios[0]);

        assert_eq!(rows[4].net_amortizable, Decimal::ZERO);
        assert_eq!(rows[10].accumulated_depreciation, rows[4].accumulated_depreciation);
        assert_eq!(rows[10].net_fixed_assets, dec!(900000));
    }

    #[test]
    fn test_ltv_none_without_assets() {
        let mut cfg = ModelConfig::default();
        cfg.tax.amortizable_share = Decimal::ONE;
        cfg.tax.deprec_years = 2;
        let sim = run_simulation(&cfg).unwrap().result;
        let rows = balance_sheet(&cfg, &sim.scenarios[0]);

        assert!(rows[0].ltv.is_some());
        assert_eq!(rows[1].net_fixed_assets, Decimal::ZERO);
        assert!(rows[1].ltv.is_none());
    }
}
