use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::financing::amortization::AmortizationSchedule;
use crate::types::Money;

/// One projection year of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    pub ebitda: Money,
    pub depreciation: Money,
    pub ebit: Money,
    pub interest: Money,
    /// EBIT less interest, floored at zero
    pub taxable_income: Money,
    pub tax: Money,
    pub net_income: Money,
    /// Cash flow available for debt service: EBITDA less tax
    pub cfads: Money,
    pub principal: Money,
    pub debt_service: Money,
    pub remaining_debt: Money,
    /// Free cash flow to equity, sale proceeds included in the final year
    pub fcfe: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_sale_proceeds: Option<Money>,
    /// `None` when there is no debt service that year
    pub dscr: Option<Decimal>,
}

/// Sale of the asset at the end of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSale {
    pub exit_value: Money,
    pub exit_costs: Money,
    /// Outstanding loan balance repaid out of the sale
    pub debt_repaid: Money,
    pub net_sale: Money,
}

pub(crate) struct HorizonProjection {
    pub years: Vec<YearProjection>,
    pub terminal_sale: Option<TerminalSale>,
}

/// Roll year-1 EBITDA forward over the horizon, layering debt service,
/// depreciation and tax, and sell the asset in the last year.
///
/// Years past the loan term carry no debt service and hold the schedule's
/// final balance as remaining debt.
pub(crate) fn project_years(
    config: &ModelConfig,
    ebitda_year1: Money,
    schedule: &AmortizationSchedule,
) -> HorizonProjection {
    let fin = &config.financing;
    let horizon = fin.horizon_years;
    let depreciation = config.annual_depreciation();
    let growth = Decimal::ONE + fin.growth_rate;

    let mut years = Vec::with_capacity(horizon as usize);
    let mut terminal_sale = None;
    let mut ebitda = ebitda_year1;

    for year in 1..=horizon {
        if year > 1 {
            ebitda *= growth;
        }

        let (interest, principal, debt_service, remaining_debt) = match schedule.row(year) {
            Some(row) => (row.interest, row.principal, row.payment, row.remaining_balance),
            None => (
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                schedule.final_balance(),
            ),
        };

        let ebit = ebitda - depreciation;
        let taxable_income = (ebit - interest).max(Decimal::ZERO);
        let tax = taxable_income * config.tax.tax_rate;
        let net_income = ebit - interest - tax;
        let cfads = ebitda - tax;
        let mut fcfe = net_income + depreciation - principal;

        let mut net_sale_proceeds = None;
        if year == horizon {
            let exit_value = ebitda * fin.exit_multiple;
            let exit_costs = exit_value * fin.exit_cost_rate;
            let net_sale = exit_value - exit_costs - remaining_debt;
            fcfe += net_sale;
            net_sale_proceeds = Some(net_sale);
            terminal_sale = Some(TerminalSale {
                exit_value,
                exit_costs,
                debt_repaid: remaining_debt,
                net_sale,
            });
        }

        let dscr = if debt_service > Decimal::ZERO {
            cfads.checked_div(debt_service)
        } else {
            None
        };

        years.push(YearProjection {
            year,
            ebitda,
            depreciation,
            ebit,
            interest,
            taxable_income,
            tax,
            net_income,
            cfads,
            principal,
            debt_service,
            remaining_debt,
            fcfe,
            net_sale_proceeds,
            dscr,
        });
    }

    HorizonProjection {
        years,
        terminal_sale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tolerance_eq(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    fn default_projection(ebitda_year1: Money) -> (ModelConfig, HorizonProjection) {
        let cfg = ModelConfig::default();
        let schedule = AmortizationSchedule::build(
            cfg.debt_amount(),
            cfg.financing.interest_rate,
            cfg.financing.loan_years,
        );
        let projection = project_years(&cfg, ebitda_year1, &schedule);
        (cfg, projection)
    }

    #[test]
    fn test_ebitda_grows_geometrically() {
        let (_, p) = default_projection(dec!(400000));
        assert_eq!(p.years.len(), 15);
        assert_eq!(p.years[0].ebitda, dec!(400000));
        assert_eq!(p.years[1].ebitda, dec!(404000));
        assert_eq!(p.years[2].ebitda, dec!(408040));
    }

    #[test]
    fn test_year1_lines() {
        let (_, p) = default_projection(dec!(400000));
        let y1 = &p.years[0];

        // 2.7M at 3%: first-year interest is 81,000
        assert_eq!(y1.interest, dec!(81000));
        assert_eq!(y1.depreciation, dec!(144000));
        assert_eq!(y1.ebit, dec!(256000));
        assert_eq!(y1.taxable_income, dec!(175000));
        assert_eq!(y1.tax, dec!(35000));
        assert_eq!(y1.net_income, dec!(140000));
        assert_eq!(y1.cfads, dec!(365000));
        assert_eq!(y1.fcfe, y1.net_income + y1.depreciation - y1.principal);
        assert!(tolerance_eq(y1.debt_service, dec!(226169.77), dec!(1)));
        assert!(y1.net_sale_proceeds.is_none());
    }

    #[test]
    fn test_taxable_income_floored_at_zero() {
        let (_, p) = default_projection(dec!(100000));
        let y1 = &p.years[0];
        assert_eq!(y1.taxable_income, Decimal::ZERO);
        assert_eq!(y1.tax, Decimal::ZERO);
        assert!(y1.net_income < Decimal::ZERO);
    }

    #[test]
    fn test_terminal_sale_in_final_year() {
        let (_, p) = default_projection(dec!(400000));
        let last = p.years.last().unwrap();
        let sale = p.terminal_sale.as_ref().unwrap();

        assert_eq!(sale.exit_value, last.ebitda * dec!(8.0));
        assert_eq!(sale.exit_costs, sale.exit_value * dec!(0.03));
        assert_eq!(sale.debt_repaid, last.remaining_debt);
        assert_eq!(last.net_sale_proceeds, Some(sale.net_sale));
        assert_eq!(
            last.fcfe,
            last.net_income + last.depreciation - last.principal + sale.net_sale
        );
    }

    #[test]
    fn test_dscr_none_after_loan_term() {
        let mut cfg = ModelConfig::default();
        cfg.financing.loan_years = 10;
        let schedule = AmortizationSchedule::build(cfg.debt_amount(), dec!(0.03), 10);
        let p = project_years(&cfg, dec!(400000), &schedule);

        assert!(p.years[9].dscr.is_some());
        for y in &p.years[10..] {
            assert_eq!(y.debt_service, Decimal::ZERO);
            assert_eq!(y.interest, Decimal::ZERO);
            assert!(y.dscr.is_none());
            assert_eq!(y.remaining_debt, schedule.final_balance());
        }
    }

    #[test]
    fn test_no_debt_projection() {
        let cfg = ModelConfig::default();
        let p = project_years(&cfg, dec!(400000), &AmortizationSchedule::default());
        assert!(p.years.iter().all(|y| y.dscr.is_none()));
        assert!(p.years.iter().all(|y| y.remaining_debt.is_zero()));
        let sale = p.terminal_sale.unwrap();
        assert_eq!(sale.debt_repaid, Decimal::ZERO);
    }

    #[test]
    fn test_single_year_horizon_sells_in_year_one() {
        let mut cfg = ModelConfig::default();
        cfg.financing.horizon_years = 1;
        let schedule = AmortizationSchedule::build(cfg.debt_amount(), dec!(0.03), 15);
        let p = project_years(&cfg, dec!(400000), &schedule);

        assert_eq!(p.years.len(), 1);
        let sale = p.terminal_sale.unwrap();
        assert_eq!(sale.exit_value, dec!(3200000));
        assert_eq!(sale.debt_repaid, schedule.rows()[0].remaining_balance);
    }
}
