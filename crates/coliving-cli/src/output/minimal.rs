use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Per-scenario results print one `name: irr` line each. Otherwise look
/// for well-known result fields in order of priority, then fall back to the
/// first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(lines) = per_scenario_lines(result_obj) {
        for line in lines {
            println!("{}", line);
        }
        return;
    }

    let priority_keys = [
        "irr",
        "annual_payment",
        "total_revenue",
        "revenue_year1",
        "ebitda_year1",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

/// `scenario: irr` (or year-1 revenue for revenue runs) for outputs that
/// carry one entry per scenario.
fn per_scenario_lines(result: &Value) -> Option<Vec<String>> {
    let rows = match result {
        Value::Array(rows) => rows,
        Value::Object(map) => map
            .get("summary")
            .or_else(|| map.get("scenarios"))
            .and_then(Value::as_array)?,
        _ => return None,
    };

    let lines: Vec<String> = rows
        .iter()
        .filter_map(|row| {
            let name = row
                .get("name")
                .or_else(|| row.get("scenario"))
                .and_then(Value::as_str)?;
            let answer = row
                .get("irr")
                .or_else(|| row.pointer("/revenue/total_revenue"))?;
            Some(format!("{}: {}", name, format_minimal(answer)))
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
