pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The array inside a result envelope that reads best as one row per item:
/// the result itself when it is a list, else its summary, schedule rows or
/// scenarios.
pub(crate) fn primary_rows(value: &Value) -> Option<&Vec<Value>> {
    let result = value.get("result")?;
    if let Value::Array(rows) = result {
        return Some(rows);
    }
    ["summary", "rows", "scenarios"]
        .iter()
        .find_map(|key| result.get(*key).and_then(Value::as_array))
}
