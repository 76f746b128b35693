use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projection::ScenarioResult;
use crate::types::{Money, Rate};

/// Simplified income statement line for one projection year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementRow {
    pub year: u32,
    pub revenue: Money,
    pub operating_costs: Money,
    pub ebitda: Money,
    pub depreciation: Money,
    pub ebit: Money,
    pub interest: Money,
    pub tax: Money,
    pub net_income: Money,
}

/// Year-1 EBITDA over revenue; `None` without positive revenue.
pub fn ebitda_margin(result: &ScenarioResult) -> Option<Rate> {
    if result.revenue_year1 <= Decimal::ZERO {
        return None;
    }
    result.ebitda_year1.checked_div(result.revenue_year1)
}

/// Income statement per year.
///
/// Revenue is backed out of projected EBITDA at the year-1 margin, so revenue
/// and costs grow at the same rate as EBITDA. With a non-positive margin the
/// revenue line reads zero.
pub fn income_statement(result: &ScenarioResult) -> Vec<IncomeStatementRow> {
    let margin = ebitda_margin(result).filter(|m| *m > Decimal::ZERO);

    result
        .year_projections
        .iter()
        .map(|y| {
            let revenue = margin
                .and_then(|m| y.ebitda.checked_div(m))
                .unwrap_or(Decimal::ZERO);
            IncomeStatementRow {
                year: y.year,
                revenue,
                operating_costs: revenue - y.ebitda,
                ebitda: y.ebitda,
                depreciation: y.depreciation,
                ebit: y.ebit,
                interest: y.interest,
                tax: y.tax,
                net_income: y.net_income,
            }
        })
        .collect()
}
