use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::{Charges, FinancingAssumptions, ModelConfig, TaxAssumptions};
use crate::projection::scenario::ScenarioFactors;
use crate::revenue::grid::{RoomSeasonAssumption, SeasonAssumption, SeasonGrid};

// Built-in case: a 15-room mountain coliving with three seasons.

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            room_types: IndexMap::from([
                ("premium_room".to_string(), 6),
                ("single_room".to_string(), 5),
                ("dormitory".to_string(), 2),
                ("studio".to_string(), 2),
            ]),
            charges: Charges {
                fixed: IndexMap::from([
                    ("staff".to_string(), dec!(200000)),
                    ("energy_heating".to_string(), dec!(60000)),
                    ("maintenance".to_string(), dec!(40000)),
                    ("marketing_booking".to_string(), dec!(15000)),
                    ("taxes_insurance".to_string(), dec!(20000)),
                    ("other_fixed".to_string(), dec!(20000)),
                ]),
                variable_cost_rate: dec!(0.15),
            },
            tax: TaxAssumptions {
                tax_rate: dec!(0.20),
                amortizable_share: dec!(0.80),
                deprec_years: 25,
            },
            financing: FinancingAssumptions {
                total_investment: dec!(4500000),
                debt_ratio: dec!(0.60),
                interest_rate: dec!(0.03),
                loan_years: 15,
                horizon_years: 15,
                growth_rate: dec!(0.01),
                exit_multiple: dec!(8.0),
                exit_cost_rate: dec!(0.03),
            },
            scenarios: IndexMap::from([
                ("Base".to_string(), ScenarioFactors::neutral()),
                (
                    "Optimistic".to_string(),
                    ScenarioFactors {
                        occ_factor: dec!(1.10),
                        price_factor: dec!(1.05),
                        cost_factor: dec!(0.95),
                    },
                ),
                (
                    "Pessimistic".to_string(),
                    ScenarioFactors {
                        occ_factor: dec!(0.90),
                        price_factor: dec!(0.97),
                        cost_factor: dec!(1.05),
                    },
                ),
            ]),
            seasons: default_seasons(),
        }
    }
}

fn default_seasons() -> SeasonGrid {
    [
        (
            "High season winter",
            90,
            [
                room(dec!(0.85), dec!(150), dec!(950), dec!(3200), [dec!(0.6), dec!(0.3), dec!(0.1)]),
                room(dec!(0.80), dec!(110), dec!(700), dec!(2400), [dec!(0.7), dec!(0.2), dec!(0.1)]),
                room(dec!(0.90), dec!(38), dec!(230), dec!(0), [dec!(0.9), dec!(0.1), dec!(0)]),
                room(dec!(0.85), dec!(170), dec!(1100), dec!(3800), [dec!(0.4), dec!(0.4), dec!(0.2)]),
            ],
        ),
        (
            "Summer season",
            90,
            [
                room(dec!(0.75), dec!(130), dec!(820), dec!(2800), [dec!(0.5), dec!(0.3), dec!(0.2)]),
                room(dec!(0.65), dec!(95), dec!(610), dec!(2100), [dec!(0.6), dec!(0.25), dec!(0.15)]),
                room(dec!(0.70), dec!(32), dec!(195), dec!(0), [dec!(0.9), dec!(0.1), dec!(0)]),
                room(dec!(0.80), dec!(150), dec!(950), dec!(3400), [dec!(0.3), dec!(0.4), dec!(0.3)]),
            ],
        ),
        (
            "Low season",
            185,
            [
                room(dec!(0.45), dec!(100), dec!(650), dec!(2300), [dec!(0.3), dec!(0.3), dec!(0.4)]),
                room(dec!(0.40), dec!(80), dec!(520), dec!(1900), [dec!(0.3), dec!(0.3), dec!(0.4)]),
                room(dec!(0.35), dec!(26), dec!(160), dec!(0), [dec!(0.85), dec!(0.15), dec!(0)]),
                room(dec!(0.60), dec!(120), dec!(780), dec!(2600), [dec!(0.2), dec!(0.3), dec!(0.5)]),
            ],
        ),
    ]
    .into_iter()
    .map(|(name, days, [premium, single, dorm, studio])| {
        let rooms = IndexMap::from([
            ("premium_room".to_string(), premium),
            ("single_room".to_string(), single),
            ("dormitory".to_string(), dorm),
            ("studio".to_string(), studio),
        ]);
        (name.to_string(), SeasonAssumption { days, rooms })
    })
    .collect()
}

/// Cell with shares given as [nightly, weekly, monthly].
fn room(
    occupancy_base: Decimal,
    price_per_night: Decimal,
    price_per_week: Decimal,
    price_per_month: Decimal,
    [share_nightly, share_weekly, share_monthly]: [Decimal; 3],
) -> RoomSeasonAssumption {
    RoomSeasonAssumption {
        occupancy_base,
        price_per_night,
        price_per_week,
        price_per_month,
        share_nightly,
        share_weekly,
        share_monthly,
    }
}
