//! JSON request/response contract.
//!
//! The outer transport (HTTP routing, templating) is not this crate's
//! concern; callers hand in a parsed JSON body and get a JSON envelope
//! back. `handle_request_str` is the string-in/string-out convenience for
//! embedders.

use serde_json::{json, Value};

use crate::catalog::FinancingCatalog;
use crate::input::normalize::{normalize_bool, normalize_value, require_value};
use crate::pricing::aggregate::FinancingLine;
use crate::pricing::decompose::{DEFAULT_SHIPPING, DEFAULT_TAX_RATE_PCT};
use crate::pricing::engine::{calculate_quote, QuoteInput};
use crate::types::Money;
use crate::PricingResult;
use rust_decimal::Decimal;

/// How numeric request fields are parsed. Lenient mode defaults malformed
/// values away, matching loose form posts; strict mode surfaces a single
/// user-facing error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Lenient,
    Strict,
}

/// Decode a request body into a `QuoteInput`, applying the documented
/// field defaults.
pub fn parse_request(
    body: &Value,
    catalog: &FinancingCatalog,
    mode: ParseMode,
) -> PricingResult<QuoteInput> {
    let field = |name: &str| body.get(name);

    let number = |name: &str, default: Money| -> PricingResult<Money> {
        match mode {
            ParseMode::Lenient => Ok(normalize_value(field(name), default)),
            ParseMode::Strict => require_value(name, field(name), default),
        }
    };

    let manual_fee_text = match field("manual_bank_fee") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let financing = parse_financing(field("financing"), catalog, mode)?;

    Ok(QuoteInput {
        total_price: number("total_price", Decimal::ZERO)?,
        tax_rate_pct: number("tax_rate", DEFAULT_TAX_RATE_PCT)?,
        include_shipping: normalize_bool(field("include_shipping"), true),
        shipping_amount: number("shipping_amount", DEFAULT_SHIPPING)?,
        cost_basis: number("bike_cost", Decimal::ZERO)?,
        seller_commission: number("seller_commission", Decimal::ZERO)?,
        manual_fee_text,
        financing,
    })
}

/// Run one calculation request and produce the response envelope:
/// `{"success": true, "results": ..., "warnings": [...]}` with monetary
/// fields rounded to 2 decimals, or `{"success": false, "error": ...}`.
pub fn handle_request(body: &Value, catalog: &FinancingCatalog, mode: ParseMode) -> Value {
    let outcome = parse_request(body, catalog, mode)
        .and_then(|input| calculate_quote(&input, catalog));

    match outcome {
        Ok(output) => json!({
            "success": true,
            "results": output.result.rounded(),
            "warnings": output.warnings,
        }),
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
        }),
    }
}

/// String-in/string-out variant for embedders without a JSON tree handy.
pub fn handle_request_str(body: &str, catalog: &FinancingCatalog, mode: ParseMode) -> String {
    let envelope = match serde_json::from_str::<Value>(body) {
        Ok(value) => handle_request(&value, catalog, mode),
        Err(e) => json!({
            "success": false,
            "error": format!("Invalid JSON request: {e}"),
        }),
    };
    envelope.to_string()
}

/// Decode the `financing` mapping (source key → {amount, rate}). Catalog
/// sources come first in catalog order so the breakdown is stable; unknown
/// keys follow and are treated as free-form sources.
fn parse_financing(
    raw: Option<&Value>,
    catalog: &FinancingCatalog,
    mode: ParseMode,
) -> PricingResult<Vec<FinancingLine>> {
    let map = match raw {
        Some(Value::Object(map)) => map,
        _ => return Ok(Vec::new()),
    };

    let mut lines = Vec::new();
    let mut push_line = |key: &str, display_name: String, entry: &Value| -> PricingResult<()> {
        let amount_field = format!("financing.{key}.amount");
        let rate_field = format!("financing.{key}.rate");
        let (amount, rate) = match mode {
            ParseMode::Lenient => (
                normalize_value(entry.get("amount"), Decimal::ZERO),
                normalize_value(entry.get("rate"), Decimal::ZERO),
            ),
            ParseMode::Strict => (
                require_value(&amount_field, entry.get("amount"), Decimal::ZERO)?,
                require_value(&rate_field, entry.get("rate"), Decimal::ZERO)?,
            ),
        };
        lines.push(FinancingLine {
            key: key.to_string(),
            display_name,
            amount_financed: amount,
            rate,
        });
        Ok(())
    };

    for entry in catalog.entries() {
        if let Some(raw_line) = map.get(&entry.key) {
            push_line(&entry.key, entry.display_name.clone(), raw_line)?;
        }
    }
    for (key, raw_line) in map {
        if catalog.get(key).is_none() {
            push_line(key, key.clone(), raw_line)?;
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn worked_body() -> Value {
        json!({
            "total_price": 5000,
            "tax_rate": 7,
            "include_shipping": true,
            "shipping_amount": 900,
            "bike_cost": 3000,
            "seller_commission": 200,
            "manual_bank_fee": "",
            "financing": {
                "in_house": {"amount": 4000, "rate": 5}
            }
        })
    }

    #[test]
    fn success_envelope_with_rounded_results() {
        let catalog = FinancingCatalog::default();
        let resp = handle_request(&worked_body(), &catalog, ParseMode::Lenient);

        assert_eq!(resp["success"], json!(true));
        let results = &resp["results"];
        assert_eq!(results["taxable_base"], json!(3831.78));
        assert_eq!(results["tax_amount"], json!(268.22));
        assert_eq!(results["total_fee_amount"], json!(200.0));
        assert_eq!(results["absorbed"]["profit"], json!(431.78));
        assert_eq!(results["passed"]["customer_price"], json!(4033.45));
        assert_eq!(results["passed"]["profit"], json!(631.78));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let catalog = FinancingCatalog::default();
        let input = parse_request(&json!({}), &catalog, ParseMode::Lenient).unwrap();
        assert_eq!(input.total_price, Decimal::ZERO);
        assert_eq!(input.tax_rate_pct, dec!(7));
        assert!(input.include_shipping);
        assert_eq!(input.shipping_amount, dec!(900.00));
        assert!(input.financing.is_empty());
    }

    #[test]
    fn lenient_mode_swallows_garbage_strict_mode_does_not() {
        let catalog = FinancingCatalog::default();
        let body = json!({"total_price": "lots", "tax_rate": 7});

        let input = parse_request(&body, &catalog, ParseMode::Lenient).unwrap();
        assert_eq!(input.total_price, Decimal::ZERO);

        let resp = handle_request(&body, &catalog, ParseMode::Strict);
        assert_eq!(resp["success"], json!(false));
        assert!(resp["error"]
            .as_str()
            .unwrap()
            .contains("Please enter valid numbers."));
    }

    #[test]
    fn malformed_fee_list_is_a_request_error() {
        let catalog = FinancingCatalog::default();
        let mut body = worked_body();
        body["manual_bank_fee"] = json!("4.5, banana");
        let resp = handle_request(&body, &catalog, ParseMode::Lenient);
        assert_eq!(resp["success"], json!(false));
        assert!(resp["error"].as_str().unwrap().contains("banana"));
    }

    #[test]
    fn degenerate_fee_percent_omits_passed_fields() {
        let catalog = FinancingCatalog::default();
        let mut body = worked_body();
        body["manual_bank_fee"] = json!("100");
        body["financing"] = json!({});
        let resp = handle_request(&body, &catalog, ParseMode::Lenient);

        assert_eq!(resp["success"], json!(true));
        assert!(resp["results"].get("passed").is_none());
        assert!(resp["results"].get("absorbed").is_some());
    }

    #[test]
    fn unknown_financing_keys_are_free_form() {
        let catalog = FinancingCatalog::default();
        let body = json!({
            "total_price": 1070,
            "tax_rate": 7,
            "include_shipping": false,
            "financing": {"street_lender": {"amount": 1000, "rate": 42}}
        });
        let input = parse_request(&body, &catalog, ParseMode::Lenient).unwrap();
        assert_eq!(input.financing.len(), 1);
        assert_eq!(input.financing[0].display_name, "street_lender");
        assert_eq!(input.financing[0].rate, dec!(42));
    }

    #[test]
    fn string_surface_round_trips() {
        let catalog = FinancingCatalog::default();
        let resp = handle_request_str(
            r#"{"total_price": "1,070", "include_shipping": false}"#,
            &catalog,
            ParseMode::Lenient,
        );
        let value: Value = serde_json::from_str(&resp).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["results"]["taxable_base"], json!(1000.0));

        let resp = handle_request_str("not json", &catalog, ParseMode::Lenient);
        let value: Value = serde_json::from_str(&resp).unwrap();
        assert_eq!(value["success"], json!(false));
    }
}
