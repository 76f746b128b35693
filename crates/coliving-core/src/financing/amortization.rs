use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::ColivingError;
use crate::types::*;
use crate::ColivingResult;

/// A single year of a constant-annuity loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub year: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance after this year's payment, never below zero
    pub remaining_balance: Money,
}

/// Year-by-year annuity schedule, built once and only read afterwards.
///
/// An empty schedule is valid and means the deal carries no debt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule {
    rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Constant-annuity schedule of `years` rows.
    ///
    /// Empty when the principal is not positive, the rate is negative, the
    /// term is zero, or `principal * rate` exceeds the decimal range. A zero rate repays `principal / years` each year with no
    /// interest.
    pub fn build(principal: Money, annual_rate: Rate, years: u32) -> Self {
        if principal <= Decimal::ZERO || annual_rate < Decimal::ZERO || years == 0 {
            return Self::default();
        }

        let Some(payment) = annual_payment(principal, annual_rate, years) else {
            debug!(%principal, %annual_rate, years, "annual payment out of range; no schedule");
            return Self::default();
        };

        let mut rows = Vec::with_capacity(years as usize);
        let mut remaining = principal;

        for year in 1..=years {
            let interest = remaining * annual_rate;
            let principal_paid = payment - interest;
            remaining = (remaining - principal_paid).max(Decimal::ZERO);

            rows.push(AmortizationRow {
                year,
                payment,
                interest,
                principal: principal_paid,
                remaining_balance: remaining,
            });
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[AmortizationRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AmortizationRow> {
        self.rows
    }

    /// Row for a 1-based loan year; `None` once the loan has been repaid.
    pub fn row(&self, year: u32) -> Option<&AmortizationRow> {
        if year == 0 {
            return None;
        }
        self.rows.get(year as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Balance left after the last scheduled payment (zero without debt).
    pub fn final_balance(&self) -> Money {
        self.rows
            .last()
            .map(|r| r.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn annual_payment(&self) -> Money {
        self.rows.first().map(|r| r.payment).unwrap_or(Decimal::ZERO)
    }

    pub fn total_interest(&self) -> Money {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.rows.iter().map(|r| r.principal).sum()
    }
}

/// Constant-annuity schedule; see [`AmortizationSchedule::build`].
pub fn build_amortization_schedule(
    principal: Money,
    annual_rate: Rate,
    years: u32,
) -> AmortizationSchedule {
    AmortizationSchedule::build(principal, annual_rate, years)
}

/// P * r / (1 - (1+r)^-n), or P / n when r = 0.
///
/// The discount factor only shrinks, so long terms tend to P * r instead of
/// overflowing. `None` only when P * r itself is out of decimal range.
fn annual_payment(principal: Money, rate: Rate, years: u32) -> Option<Money> {
    if rate.is_zero() {
        return Some(principal / Decimal::from(years));
    }

    let discount = Decimal::ONE.checked_div(Decimal::ONE + rate)?;
    let discount_n = (0..years).fold(Decimal::ONE, |acc, _| acc * discount);
    let annuity_factor = Decimal::ONE - discount_n;
    if annuity_factor.is_zero() {
        // rate below decimal resolution
        return Some(principal / Decimal::from(years));
    }

    principal.checked_mul(rate)?.checked_div(annuity_factor)
}

// ---------------------------------------------------------------------------
// Standalone schedule computation
// ---------------------------------------------------------------------------

/// Input for a standalone loan schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub debt_amount: Money,
    pub interest_rate: Rate,
    pub loan_years: u32,
}

/// Standalone loan schedule with totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub annual_payment: Money,
    pub rows: Vec<AmortizationRow>,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    pub total_paid: Money,
}

/// Build a year-by-year annuity schedule for a single loan.
pub fn amortization_schedule(
    input: &AmortizationInput,
) -> ColivingResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.debt_amount < Decimal::ZERO {
        return Err(ColivingError::InvalidInput {
            field: "debt_amount".into(),
            reason: "Debt amount cannot be negative".into(),
        });
    }
    if input.interest_rate < Decimal::ZERO {
        return Err(ColivingError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let schedule =
        AmortizationSchedule::build(input.debt_amount, input.interest_rate, input.loan_years);
    if schedule.is_empty() && input.debt_amount > Decimal::ZERO && input.loan_years > 0 {
        return Err(ColivingError::InvalidInput {
            field: "interest_rate".into(),
            reason: format!(
                "Annual payment on {} at {} is out of range",
                input.debt_amount, input.interest_rate
            ),
        });
    }
    if schedule.is_empty() {
        warnings.push("No debt to amortise: schedule is empty".into());
    }

    let total_interest_paid = schedule.total_interest();
    let total_principal_paid = schedule.total_principal();
    let output = AmortizationOutput {
        annual_payment: schedule.annual_payment(),
        total_interest_paid,
        total_principal_paid,
        total_paid: total_interest_paid + total_principal_paid,
        rows: schedule.into_rows(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Constant Annuity Amortization",
        &serde_json::json!({
            "debt_amount": input.debt_amount.to_string(),
            "interest_rate": input.interest_rate.to_string(),
            "loan_years": input.loan_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}
