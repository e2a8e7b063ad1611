use serde_json::Value;

use super::flatten_result;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority
/// (flattened, so scenario figures are addressable), then fall back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields for this domain
    let priority_keys = [
        "passed.customer_price",
        "passed.profit",
        "absorbed.profit",
        "absorbed.net_to_store",
        "taxable_base",
        "total_fee_amount",
        "total",
        "tax_amount",
    ];

    let rows = flatten_result(result_obj);
    if !rows.is_empty() {
        for key in &priority_keys {
            if let Some((_, val)) = rows.iter().find(|(k, _)| k == key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        let (key, val) = &rows[0];
        println!("{}: {}", key, format_minimal(val));
        return;
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
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
