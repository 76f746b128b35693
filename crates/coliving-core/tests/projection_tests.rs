use coliving_core::config::{ConfigOverlay, ModelConfig};
use coliving_core::financing::amortization::{
    amortization_schedule, build_amortization_schedule, AmortizationInput,
};
use coliving_core::projection::{run_simulation, ScenarioFactors};
use coliving_core::statements::build_statements;
use coliving_core::time_value::{irr, npv, IrrSettings};
use coliving_core::ColivingError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Built-in case with prices doubled and leaner staffing, so every scenario
/// is profitable.
fn profitable_config() -> ModelConfig {
    let overlay: ConfigOverlay = serde_json::from_value(serde_json::json!({
        "charges": { "fixed": { "staff": 80000 } },
        "scenarios": {
            "Base": { "price_factor": 2 },
            "Optimistic": { "price_factor": 2.1 },
            "Pessimistic": { "price_factor": 1.94 }
        }
    }))
    .unwrap();
    ModelConfig::from_overlay(overlay)
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_schedule_repays_debt() {
    let schedule = build_amortization_schedule(dec!(1_000_000), dec!(0.03), 15);
    assert_eq!(schedule.len(), 15);
    assert!(schedule.final_balance() < dec!(0.000001));

    let repaid = schedule.total_principal();
    assert!((repaid - dec!(1_000_000)).abs() < dec!(0.000001));

    let balances: Vec<Decimal> = schedule.rows().iter().map(|r| r.remaining_balance).collect();
    assert!(balances.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_zero_rate_schedule() {
    let schedule = build_amortization_schedule(dec!(900_000), Decimal::ZERO, 9);
    for row in schedule.rows() {
        assert_eq!(row.payment, dec!(100_000));
        assert_eq!(row.interest, Decimal::ZERO);
    }
    assert_eq!(schedule.final_balance(), Decimal::ZERO);
}

#[test]
fn test_enveloped_schedule_totals() {
    let input = AmortizationInput {
        debt_amount: dec!(2_700_000),
        interest_rate: dec!(0.03),
        loan_years: 15,
    };
    let out = amortization_schedule(&input).unwrap();
    let r = &out.result;

    assert_eq!(r.rows.len(), 15);
    assert!((r.total_principal_paid - dec!(2_700_000)).abs() < dec!(0.0001));
    assert!((r.total_paid - r.annual_payment * dec!(15)).abs() < dec!(0.0001));
    assert_eq!(out.methodology, "Constant Annuity Amortization");
}

// ===========================================================================
// IRR
// ===========================================================================

#[test]
fn test_irr_two_period_project() {
    let rate = irr(&[dec!(-100), dec!(60), dec!(60)], &IrrSettings::default()).unwrap();
    assert!((rate - dec!(0.1306)).abs() < dec!(0.0001), "got {rate}");

    let at_root = npv(rate, &[dec!(-100), dec!(60), dec!(60)]).unwrap();
    assert!(at_root.abs() < dec!(0.0001));
}

#[test]
fn test_irr_undefined_without_sign_change() {
    assert!(irr(&[dec!(100), dec!(60), dec!(60)], &IrrSettings::default()).is_none());
    assert!(irr(&[dec!(-100), dec!(-60)], &IrrSettings::default()).is_none());
}

// ===========================================================================
// Full simulation
// ===========================================================================

#[test]
fn test_same_config_same_result() {
    let cfg = profitable_config();
    let a = run_simulation(&cfg).unwrap();
    let b = run_simulation(&cfg).unwrap();
    assert_eq!(a.result, b.result);
}

#[test]
fn test_profitable_scenarios_rank_by_irr() {
    let out = run_simulation(&profitable_config()).unwrap();
    let sim = &out.result;

    let base = sim.scenario("Base").unwrap().irr.unwrap();
    let opt = sim.scenario("Optimistic").unwrap().irr.unwrap();
    let pess = sim.scenario("Pessimistic").unwrap().irr.unwrap();
    assert!(opt > base, "optimistic {opt} <= base {base}");
    assert!(base > pess, "base {base} <= pessimistic {pess}");

    // IRR discounts the series to zero
    let series = &sim.scenario("Base").unwrap().cashflow_series;
    assert!(npv(base, series).unwrap().abs() < dec!(1));
}

#[test]
fn test_cashflow_series_matches_year_lines() {
    let cfg = profitable_config();
    let out = run_simulation(&cfg).unwrap();

    for scenario in &out.result.scenarios {
        let series = &scenario.cashflow_series;
        assert_eq!(series[0], -cfg.equity_amount());
        for (t, year) in scenario.year_projections.iter().enumerate() {
            assert_eq!(year.year as usize, t + 1);
            assert_eq!(series[t + 1], year.fcfe);
            assert_eq!(year.cfads, year.ebitda - year.tax);
            assert_eq!(year.taxable_income, (year.ebit - year.interest).max(Decimal::ZERO));
        }

        let last = scenario.year_projections.last().unwrap();
        let sale = scenario.terminal_sale.as_ref().unwrap();
        assert_eq!(sale.net_sale, sale.exit_value - sale.exit_costs - sale.debt_repaid);
        assert_eq!(last.net_sale_proceeds, Some(sale.net_sale));
    }
}

#[test]
fn test_occupancy_cap_in_full_run() {
    let overlay: ConfigOverlay = serde_json::from_value(serde_json::json!({
        "seasons": {
            "High season winter": { "rooms": { "dormitory": { "occupancy_base": 0.95 } } }
        },
        "scenarios": { "Full house": { "occ_factor": 1.5 } }
    }))
    .unwrap();
    let cfg = ModelConfig::from_overlay(overlay);
    let out = run_simulation(&cfg).unwrap();

    let full = out.result.scenario("Full house").unwrap();
    for season in &full.revenue.per_season {
        for line in &season.by_room_type {
            assert!(line.occupancy_rate <= Decimal::ONE);
        }
    }
    let dorm = full.revenue.line("High season winter", "dormitory").unwrap();
    assert_eq!(dorm.occupancy_rate, Decimal::ONE);
    assert_eq!(dorm.occupied_nights, dec!(180));
}

#[test]
fn test_shorter_loan_leaves_dscr_undefined() {
    let mut cfg = profitable_config();
    cfg.financing.loan_years = 7;
    let out = run_simulation(&cfg).unwrap();

    for scenario in &out.result.scenarios {
        let years = &scenario.year_projections;
        assert!(years[..7].iter().all(|y| y.dscr.is_some()));
        assert!(years[7..].iter().all(|y| y.dscr.is_none() && y.principal.is_zero()));
    }
}

#[test]
fn test_custom_scenario_factors() {
    let mut cfg = profitable_config();
    cfg.scenarios.clear();
    cfg.scenarios.insert(
        "Flat".into(),
        ScenarioFactors {
            occ_factor: Decimal::ZERO,
            price_factor: Decimal::ONE,
            cost_factor: Decimal::ONE,
        },
    );
    let out = run_simulation(&cfg).unwrap();
    let flat = &out.result.scenarios[0];

    assert_eq!(flat.revenue_year1, Decimal::ZERO);
    assert_eq!(flat.costs_year1, cfg.fixed_costs_total());
    assert!(flat.irr.is_none());
}

#[test]
fn test_invalid_overlay_values_rejected() {
    let overlay: ConfigOverlay = serde_json::from_value(serde_json::json!({
        "financing": { "exit_cost_rate": 1.5 }
    }))
    .unwrap();
    let cfg = ModelConfig::from_overlay(overlay);

    match run_simulation(&cfg) {
        Err(ColivingError::InvalidInput { field, .. }) => {
            assert_eq!(field, "financing.exit_cost_rate")
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_runaway_growth_and_terms_rejected() {
    let overlay: ConfigOverlay = serde_json::from_value(serde_json::json!({
        "financing": { "growth_rate": 1, "horizon_years": 100, "loan_years": 100 }
    }))
    .unwrap();
    let cfg = ModelConfig::from_overlay(overlay);

    match run_simulation(&cfg) {
        Err(ColivingError::InvalidInput { field, .. }) => {
            assert!(field.starts_with("financing."), "got {field}")
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_longest_accepted_terms_keep_the_loan() {
    let mut cfg = profitable_config();
    cfg.financing.growth_rate = dec!(0.5);
    cfg.financing.horizon_years = 40;
    cfg.financing.loan_years = 40;
    let out = run_simulation(&cfg).unwrap();

    assert_eq!(out.result.amortization.len(), 40);
    for scenario in &out.result.scenarios {
        assert_eq!(scenario.year_projections.len(), 40);
        assert!(scenario.year_projections[0].debt_service > Decimal::ZERO);
    }
}

// ===========================================================================
// Statements
// ===========================================================================

#[test]
fn test_statements_for_profitable_case() {
    let cfg = profitable_config();
    let sim = run_simulation(&cfg).unwrap().result;
    let out = build_statements(&cfg, &sim).unwrap();

    assert!(out.warnings.is_empty(), "unexpected: {:?}", out.warnings);

    let base = &out.result.scenarios[0];
    let y1 = &base.income_statement[0];
    assert!((y1.revenue - sim.scenarios[0].revenue_year1).abs() < dec!(0.0001));

    assert_eq!(base.ratios.initial_ltv, dec!(0.60));
    assert_eq!(base.ratios.irr, sim.scenarios[0].irr);
    let min = base.ratios.min_dscr.unwrap();
    let avg = base.ratios.avg_dscr.unwrap();
    assert!(min <= avg);

    let last_bs = base.balance_sheet.last().unwrap();
    assert_eq!(base.ratios.final_ltv, last_bs.ltv);
}
