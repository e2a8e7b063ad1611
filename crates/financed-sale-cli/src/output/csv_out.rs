use serde_json::Value;
use std::io;

use super::flatten_result;

/// Write output as CSV to stdout: field/value rows for the quote figures,
/// with the fee breakdown appended as its own record block.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let target = map.get("result").unwrap_or(value);
            let _ = wtr.write_record(["field", "value"]);

            let mut breakdown: Option<Vec<Value>> = None;
            for (key, val) in flatten_result(target) {
                if key == "fee_breakdown" {
                    if let Value::Array(arr) = val {
                        breakdown = Some(arr);
                    }
                    continue;
                }
                let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
            }

            if let Some(lines) = breakdown {
                write_array_csv(&mut wtr, &lines);
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(|v| format_csv_value(v)).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
