use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::PricingError;
use crate::types::Money;
use crate::PricingResult;

/// Parse a form-sourced numeric string. Strips whitespace, thousands
/// separators and percent signs before parsing. `None` when the cleaned
/// string is empty or fails to parse.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '%')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

/// Lenient normalization of a loosely-typed request field: accepts a JSON
/// number, a numeric string, or nothing at all. Malformed input degrades
/// silently to `default` — form fields are not trusted to be well typed.
pub fn normalize_value(raw: Option<&Value>, default: Money) -> Money {
    match raw {
        None | Some(Value::Null) => default,
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().unwrap_or(default),
        Some(Value::String(s)) => parse_decimal(s).unwrap_or(default),
        Some(_) => default,
    }
}

/// Strict variant for required fields: absent or empty still defaults, but
/// a present, malformed value is an error surfaced to the caller.
pub fn require_value(field: &str, raw: Option<&Value>, default: Money) -> PricingResult<Money> {
    let invalid = || PricingError::InvalidInput {
        field: field.to_string(),
        reason: "Please enter valid numbers.".to_string(),
    };
    match raw {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().map_err(|_| invalid()),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                return Ok(default);
            }
            parse_decimal(s).ok_or_else(invalid)
        }
        Some(_) => Err(invalid()),
    }
}

/// Normalize a boolean-ish field. Form posts send "on"/"1"/"true";
/// JSON clients send a real boolean. Anything unrecognized defaults.
pub fn normalize_bool(raw: Option<&Value>, default: bool) -> bool {
    match raw {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(default),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => true,
            "false" | "0" | "off" | "no" => false,
            _ => default,
        },
        Some(_) => default,
    }
}
