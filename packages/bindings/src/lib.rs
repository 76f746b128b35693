use napi::Result as NapiResult;
use napi_derive::napi;

use coliving_core::config::{ConfigOverlay, ModelConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Built-in assumptions with the JSON overlay merged on top. An empty string
/// selects the defaults unchanged.
fn config_from_json(config_json: &str) -> NapiResult<ModelConfig> {
    if config_json.trim().is_empty() {
        return Ok(ModelConfig::default());
    }
    let overlay: ConfigOverlay = serde_json::from_str(config_json).map_err(to_napi_error)?;
    Ok(ModelConfig::from_overlay(overlay))
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[napi]
pub fn default_config() -> NapiResult<String> {
    serde_json::to_string(&ModelConfig::default()).map_err(to_napi_error)
}

#[napi]
pub fn validate_config(config_json: String) -> NapiResult<String> {
    let config = config_from_json(&config_json)?;
    let warnings = coliving_core::config::validate_config(&config).map_err(to_napi_error)?;
    serde_json::to_string(&warnings).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn run_simulation(config_json: String) -> NapiResult<String> {
    let config = config_from_json(&config_json)?;
    let output =
        coliving_core::projection::simulation::run_simulation(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_revenue(config_json: String, scenario: Option<String>) -> NapiResult<String> {
    let config = config_from_json(&config_json)?;
    let output =
        coliving_core::projection::simulation::scenario_revenue(&config, scenario.as_deref())
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_statements(config_json: String) -> NapiResult<String> {
    let config = config_from_json(&config_json)?;
    let run =
        coliving_core::projection::simulation::run_simulation(&config).map_err(to_napi_error)?;
    let output = coliving_core::statements::build_statements(&config, &run.result)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing and returns
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: coliving_core::financing::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = coliving_core::financing::amortization::amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_irr(input_json: String) -> NapiResult<String> {
    let input: coliving_core::time_value::IrrInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = coliving_core::time_value::irr_analysis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct NpvBindingInput {
    rate: rust_decimal::Decimal,
    cash_flows: Vec<rust_decimal::Decimal>,
}

#[napi]
pub fn calculate_npv(input_json: String) -> NapiResult<String> {
    let input: NpvBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let npv =
        coliving_core::time_value::npv(input.rate, &input.cash_flows).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "npv": npv })).map_err(to_napi_error)
}
