use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::ModelConfig;
use crate::error::ColivingError;
use crate::ColivingResult;

const DAYS_PER_YEAR: u32 = 365;
const SHARE_SUM_TOLERANCE: Decimal = dec!(0.001);
const MAX_TERM_YEARS: u32 = 40;
const MAX_GROWTH_RATE: Decimal = dec!(0.5);
const MAX_INTEREST_RATE: Decimal = dec!(1);
const MAX_EXIT_MULTIPLE: Decimal = dec!(100);

/// Reject configurations the projection engine is not specified for, and
/// collect warnings for unusual but computable ones.
///
/// Base occupancy must lie in [0, 1]; the revenue model itself does not
/// clamp it.
pub fn validate_config(config: &ModelConfig) -> ColivingResult<Vec<String>> {
    let mut warnings: Vec<String> = Vec::new();

    if config.room_types.is_empty() {
        return Err(ColivingError::InsufficientData(
            "At least one room type is required".into(),
        ));
    }
    if config.seasons.is_empty() {
        return Err(ColivingError::InsufficientData(
            "At least one season is required".into(),
        ));
    }
    if config.scenarios.is_empty() {
        return Err(ColivingError::InsufficientData(
            "At least one scenario is required".into(),
        ));
    }

    validate_charges(config)?;
    validate_tax(config)?;
    validate_financing(config)?;
    validate_scenarios(config)?;
    validate_seasons(config, &mut warnings)?;

    Ok(warnings)
}

fn validate_charges(config: &ModelConfig) -> ColivingResult<()> {
    for (item, amount) in &config.charges.fixed {
        non_negative(&format!("charges.fixed.{item}"), *amount)?;
    }
    unit_interval("charges.variable_cost_rate", config.charges.variable_cost_rate)
}

fn validate_tax(config: &ModelConfig) -> ColivingResult<()> {
    unit_interval("tax.tax_rate", config.tax.tax_rate)?;
    unit_interval("tax.amortizable_share", config.tax.amortizable_share)?;
    if config.tax.deprec_years == 0 {
        return Err(ColivingError::InvalidInput {
            field: "tax.deprec_years".into(),
            reason: "Depreciation period must be at least 1 year".into(),
        });
    }
    Ok(())
}

fn validate_financing(config: &ModelConfig) -> ColivingResult<()> {
    let fin = &config.financing;

    if fin.total_investment <= Decimal::ZERO {
        return Err(ColivingError::InvalidInput {
            field: "financing.total_investment".into(),
            reason: "Total investment must be positive".into(),
        });
    }
    unit_interval("financing.debt_ratio", fin.debt_ratio)?;
    in_range(
        "financing.interest_rate",
        fin.interest_rate,
        Decimal::ZERO,
        MAX_INTEREST_RATE,
    )?;
    term_years("financing.loan_years", fin.loan_years)?;
    term_years("financing.horizon_years", fin.horizon_years)?;
    in_range(
        "financing.growth_rate",
        fin.growth_rate,
        -MAX_GROWTH_RATE,
        MAX_GROWTH_RATE,
    )?;
    in_range(
        "financing.exit_multiple",
        fin.exit_multiple,
        Decimal::ZERO,
        MAX_EXIT_MULTIPLE,
    )?;
    unit_interval("financing.exit_cost_rate", fin.exit_cost_rate)
}

fn validate_scenarios(config: &ModelConfig) -> ColivingResult<()> {
    for (name, factors) in &config.scenarios {
        non_negative(&format!("scenarios.{name}.occ_factor"), factors.occ_factor)?;
        non_negative(&format!("scenarios.{name}.price_factor"), factors.price_factor)?;
        non_negative(&format!("scenarios.{name}.cost_factor"), factors.cost_factor)?;
    }
    Ok(())
}

fn validate_seasons(config: &ModelConfig, warnings: &mut Vec<String>) -> ColivingResult<()> {
    for (season_name, season) in config.seasons.iter() {
        if season.days == 0 {
            return Err(ColivingError::InvalidInput {
                field: format!("seasons.{season_name}.days"),
                reason: "Season length must be at least 1 day".into(),
            });
        }

        for (room_name, cell) in &season.rooms {
            let field = |name: &str| format!("seasons.{season_name}.rooms.{room_name}.{name}");

            unit_interval(&field("occupancy_base"), cell.occupancy_base)?;
            non_negative(&field("price_per_night"), cell.price_per_night)?;
            non_negative(&field("price_per_week"), cell.price_per_week)?;
            non_negative(&field("price_per_month"), cell.price_per_month)?;
            non_negative(&field("share_nightly"), cell.share_nightly)?;
            non_negative(&field("share_weekly"), cell.share_weekly)?;
            non_negative(&field("share_monthly"), cell.share_monthly)?;

            let share_sum = cell.share_nightly + cell.share_weekly + cell.share_monthly;
            if share_sum.is_zero() {
                warnings.push(format!(
                    "{season_name} / {room_name}: booking shares are all zero; blended rate is 0"
                ));
            } else if (share_sum - Decimal::ONE).abs() > SHARE_SUM_TOLERANCE {
                warnings.push(format!(
                    "{season_name} / {room_name}: booking shares sum to {share_sum}; normalised to 1"
                ));
            }

            if !config.room_types.contains_key(room_name) {
                warnings.push(format!(
                    "{season_name}: pricing for unknown room type '{room_name}' is ignored"
                ));
            }
        }

        for room_name in config.room_types.keys() {
            if !season.rooms.contains_key(room_name) {
                warnings.push(format!(
                    "{season_name}: no pricing for room type '{room_name}'; contributes no revenue"
                ));
            }
        }
    }

    let total_days = config.seasons.total_days();
    if total_days != DAYS_PER_YEAR {
        warnings.push(format!(
            "Season lengths sum to {total_days} days, not {DAYS_PER_YEAR}"
        ));
    }

    Ok(())
}

fn unit_interval(field: &str, value: Decimal) -> ColivingResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ColivingError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between 0 and 1 (got {value})"),
        });
    }
    Ok(())
}

fn in_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> ColivingResult<()> {
    if value < min || value > max {
        return Err(ColivingError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between {min} and {max} (got {value})"),
        });
    }
    Ok(())
}

/// Loan term and projection horizon: 1 to 40 whole years.
fn term_years(field: &str, years: u32) -> ColivingResult<()> {
    if years == 0 || years > MAX_TERM_YEARS {
        return Err(ColivingError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between 1 and {MAX_TERM_YEARS} years (got {years})"),
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: Decimal) -> ColivingResult<()> {
    if value < Decimal::ZERO {
        return Err(ColivingError::InvalidInput {
            field: field.into(),
            reason: format!("Cannot be negative (got {value})"),
        });
    }
    Ok(())
}
