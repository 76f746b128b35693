use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

use crate::error::ColivingError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ColivingResult;

const DEFAULT_LOWER_BOUND: Decimal = dec!(-0.9);
const DEFAULT_UPPER_BOUND: Decimal = dec!(1.0);
const DEFAULT_TOLERANCE: Decimal = dec!(0.000001);
const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Search settings for the bisection IRR solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSettings {
    /// Lowest rate considered (-0.9 = -90% per year)
    pub lower_bound: Rate,
    /// Highest rate considered (1.0 = +100% per year)
    pub upper_bound: Rate,
    /// Absolute NPV below which the midpoint is accepted
    pub tolerance: Money,
    pub max_iterations: u32,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Net Present Value of a series of annual cash flows, index 0 undiscounted.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> ColivingResult<Money> {
    if rate == dec!(-1) {
        return Err(ColivingError::DivisionByZero {
            context: "NPV discount factor at rate -100%".into(),
        });
    }
    if rate < dec!(-1) {
        return Err(ColivingError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    discounted_sum(rate, cash_flows).ok_or_else(|| ColivingError::InvalidInput {
        field: "rate".into(),
        reason: format!("NPV at rate {rate} exceeds the representable decimal range"),
    })
}

/// True when the series contains both a strictly positive and a strictly
/// negative flow.
pub fn has_sign_change(cash_flows: &[Money]) -> bool {
    let all_non_negative = cash_flows.iter().all(|cf| *cf >= Decimal::ZERO);
    let all_non_positive = cash_flows.iter().all(|cf| *cf <= Decimal::ZERO);
    !(all_non_negative || all_non_positive)
}

/// Internal Rate of Return by bisection.
///
/// Returns `None` when the series has no sign change, or when the search
/// interval is unusable (lower bound at or below -100%, or not below the
/// upper bound). Otherwise returns the first midpoint whose NPV is within
/// tolerance, or the last midpoint once `max_iterations` is exhausted.
pub fn irr(cash_flows: &[Money], settings: &IrrSettings) -> Option<Rate> {
    if !has_sign_change(cash_flows) {
        debug!(periods = cash_flows.len(), "IRR undefined: no sign change");
        return None;
    }
    if settings.lower_bound <= dec!(-1) || settings.lower_bound >= settings.upper_bound {
        debug!(
            lower = %settings.lower_bound,
            upper = %settings.upper_bound,
            "IRR undefined: unusable search interval"
        );
        return None;
    }

    let mut low = settings.lower_bound;
    let mut high = settings.upper_bound;
    let mut mid = (low + high) / dec!(2);

    for iteration in 0..settings.max_iterations {
        mid = (low + high) / dec!(2);
        let value =
            discounted_sum(mid, cash_flows).unwrap_or_else(|| dominant_tail_sign(cash_flows));
        trace!(iteration, rate = %mid, npv = %value, "IRR bisection step");

        if value.abs() < settings.tolerance {
            debug!(iterations = iteration + 1, rate = %mid, "IRR converged");
            return Some(mid);
        }

        if value > Decimal::ZERO {
            low = mid;
        } else {
            high = mid;
        }
    }

    debug!(
        iterations = settings.max_iterations,
        rate = %mid,
        "IRR iteration cap reached; returning last midpoint"
    );
    Some(mid)
}

/// Annual cash flows, index 0 at inception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrInput {
    pub cash_flows: Vec<Money>,
    #[serde(default)]
    pub settings: IrrSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrOutput {
    pub irr: Option<Rate>,
    /// Residual NPV at the returned rate
    pub npv_at_irr: Option<Money>,
    pub periods: usize,
    pub total_inflows: Money,
    pub total_outflows: Money,
}

/// IRR of a cash-flow series, wrapped with settings and warnings.
pub fn irr_analysis(input: &IrrInput) -> ColivingResult<ComputationOutput<IrrOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.cash_flows.len() < 2 {
        return Err(ColivingError::InsufficientData(
            "IRR needs at least two cash flows".into(),
        ));
    }
    if input.settings.lower_bound <= dec!(-1)
        || input.settings.lower_bound >= input.settings.upper_bound
    {
        return Err(ColivingError::InvalidInput {
            field: "settings.lower_bound".into(),
            reason: "Lower bound must be above -100% and below the upper bound".into(),
        });
    }

    let rate = irr(&input.cash_flows, &input.settings);
    if rate.is_none() {
        warnings.push("IRR undefined: cash flows never change sign".into());
    }
    let npv_at_irr = rate.and_then(|r| discounted_sum(r, &input.cash_flows));

    let total_inflows = input
        .cash_flows
        .iter()
        .filter(|cf| cf.is_sign_positive())
        .copied()
        .sum();
    let total_outflows = input
        .cash_flows
        .iter()
        .filter(|cf| cf.is_sign_negative())
        .copied()
        .sum();

    let output = IrrOutput {
        irr: rate,
        npv_at_irr,
        periods: input.cash_flows.len(),
        total_inflows,
        total_outflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IRR by bisection on annual cash flows",
        &input.settings,
        warnings,
        elapsed,
        output,
    ))
}

/// Sum of `cf_t / (1 + rate)^t`, or `None` if an intermediate value leaves
/// the decimal range.
fn discounted_sum(rate: Rate, cash_flows: &[Money]) -> Option<Money> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    let mut total = Decimal::ZERO;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            factor = factor.checked_div(one_plus_r)?;
        }
        total = total.checked_add(cf.checked_mul(factor)?)?;
    }

    Some(total)
}

/// As (1 + r) approaches zero the latest non-zero flow dominates the NPV.
/// Stand-in value carrying that flow's sign.
fn dominant_tail_sign(cash_flows: &[Money]) -> Money {
    match cash_flows.iter().rev().find(|cf| !cf.is_zero()) {
        Some(cf) if cf.is_sign_positive() => Decimal::MAX,
        Some(_) => Decimal::MIN,
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv(dec!(0.10), &cfs).unwrap();
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        let result = npv(dec!(0.0), &cfs).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_npv_rate_below_minus_one_rejected() {
        let cfs = vec![dec!(-100), dec!(110)];
        assert!(matches!(
            npv(dec!(-1), &cfs),
            Err(ColivingError::DivisionByZero { .. })
        ));
        assert!(matches!(
            npv(dec!(-1.5), &cfs),
            Err(ColivingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_irr_two_equal_receipts() {
        // 60/(1+r) + 60/(1+r)^2 = 100 => r ≈ 13.07%
        let cfs = vec![dec!(-100), dec!(60), dec!(60)];
        let result = irr(&cfs, &IrrSettings::default()).unwrap();
        assert!(
            (result - dec!(0.1306)).abs() < dec!(0.0005),
            "Expected IRR ~13.06%, got {result}"
        );
        let residual = npv(result, &cfs).unwrap();
        assert!(residual.abs() < dec!(0.000001));
    }

    #[test]
    fn test_irr_all_positive_is_undefined() {
        let cfs = vec![dec!(100), dec!(60), dec!(60)];
        assert_eq!(irr(&cfs, &IrrSettings::default()), None);
    }

    #[test]
    fn test_irr_all_negative_is_undefined() {
        let cfs = vec![dec!(-100), dec!(-60), dec!(0)];
        assert_eq!(irr(&cfs, &IrrSettings::default()), None);
    }

    #[test]
    fn test_irr_empty_and_zero_series_undefined() {
        assert_eq!(irr(&[], &IrrSettings::default()), None);
        assert_eq!(
            irr(&[Decimal::ZERO, Decimal::ZERO], &IrrSettings::default()),
            None
        );
    }

    #[test]
    fn test_irr_negative_return_over_long_horizon() {
        // 40 receipts of 10 against 1000 invested: deeply negative IRR,
        // NPV evaluations near -90% overflow and must not panic.
        let mut cfs = vec![dec!(-1000)];
        cfs.extend(std::iter::repeat(dec!(10)).take(40));
        let result = irr(&cfs, &IrrSettings::default()).unwrap();
        assert!(result < Decimal::ZERO, "IRR should be negative, got {result}");
        assert!(result > dec!(-0.9));
        let residual = npv(result, &cfs).unwrap();
        assert!(residual.abs() < dec!(0.001), "residual NPV {residual}");
    }

    #[test]
    fn test_irr_iteration_cap_returns_last_midpoint() {
        let cfs = vec![dec!(-100), dec!(60), dec!(60)];
        let settings = IrrSettings {
            max_iterations: 1,
            ..IrrSettings::default()
        };
        // First midpoint of [-0.9, 1.0]
        assert_eq!(irr(&cfs, &settings), Some(dec!(0.05)));
    }

    #[test]
    fn test_irr_invalid_interval() {
        let cfs = vec![dec!(-100), dec!(60), dec!(60)];
        let settings = IrrSettings {
            lower_bound: dec!(0.5),
            upper_bound: dec!(0.1),
            ..IrrSettings::default()
        };
        assert_eq!(irr(&cfs, &settings), None);
    }

    #[test]
    fn test_sign_change_detection() {
        assert!(has_sign_change(&[dec!(-1), dec!(2)]));
        assert!(!has_sign_change(&[dec!(0), dec!(2)]));
        assert!(!has_sign_change(&[dec!(-1), dec!(0)]));
    }

    #[test]
    fn test_irr_analysis_envelope() {
        let input: IrrInput = serde_json::from_value(serde_json::json!({
            "cash_flows": ["-100", "60", "60"]
        }))
        .unwrap();
        let out = irr_analysis(&input).unwrap();

        let rate = out.result.irr.unwrap();
        assert!((rate - dec!(0.1306)).abs() < dec!(0.0001));
        assert!(out.result.npv_at_irr.unwrap().abs() < dec!(0.000001));
        assert_eq!(out.result.total_inflows, dec!(120));
        assert_eq!(out.result.total_outflows, dec!(-100));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_irr_analysis_rejects_short_series() {
        let input = IrrInput {
            cash_flows: vec![dec!(-100)],
            settings: IrrSettings::default(),
        };
        assert!(matches!(
            irr_analysis(&input),
            Err(ColivingError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_irr_analysis_warns_when_undefined() {
        let input = IrrInput {
            cash_flows: vec![dec!(100), dec!(60)],
            settings: IrrSettings::default(),
        };
        let out = irr_analysis(&input).unwrap();
        assert!(out.result.irr.is_none());
        assert_eq!(out.warnings.len(), 1);
    }
}
