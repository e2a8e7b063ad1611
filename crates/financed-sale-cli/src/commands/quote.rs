use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use financed_sale_core::api::{self, ParseMode};
use financed_sale_core::catalog::FinancingCatalog;
use financed_sale_core::pricing::aggregate::FinancingLine;
use financed_sale_core::pricing::decompose::{DEFAULT_SHIPPING, DEFAULT_TAX_RATE_PCT};
use financed_sale_core::pricing::engine::{calculate_quote, QuoteInput};

use super::catalog::load_catalog;
use crate::input;

/// Arguments for the full quote calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Path to a JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a financing catalog JSON file (defaults to the built-in table)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Fail on malformed numeric fields instead of defaulting them
    #[arg(long)]
    pub strict: bool,

    /// Customer-facing total price, tax and shipping inclusive
    #[arg(long)]
    pub total_price: Option<Decimal>,

    /// Tax rate in percent
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Whether the total includes the flat shipping charge
    #[arg(long)]
    pub include_shipping: Option<bool>,

    /// Flat shipping charge
    #[arg(long)]
    pub shipping_amount: Option<Decimal>,

    /// Merchant's cost of goods
    #[arg(long, alias = "bike-cost")]
    pub cost_basis: Option<Decimal>,

    /// Flat seller commission
    #[arg(long)]
    pub seller_commission: Option<Decimal>,

    /// Comma-separated manual bank fee percentages, e.g. "4.5, 3"
    #[arg(long)]
    pub manual_fees: Option<String>,

    /// Financing line as key=amount:rate (repeatable)
    #[arg(long)]
    pub financing: Vec<String>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mode = if args.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let quote_input: QuoteInput = if let Some(ref path) = args.input {
        let body = input::file::read_json_value(path)?;
        api::parse_request(&body, &catalog, mode)?
    } else if let Some(body) = input::stdin::read_stdin()? {
        api::parse_request(&body, &catalog, mode)?
    } else {
        QuoteInput {
            total_price: args
                .total_price
                .ok_or("--total-price is required (or provide --input)")?,
            tax_rate_pct: args.tax_rate.unwrap_or(DEFAULT_TAX_RATE_PCT),
            include_shipping: args.include_shipping.unwrap_or(true),
            shipping_amount: args.shipping_amount.unwrap_or(DEFAULT_SHIPPING),
            cost_basis: args.cost_basis.unwrap_or(Decimal::ZERO),
            seller_commission: args.seller_commission.unwrap_or(Decimal::ZERO),
            manual_fee_text: args.manual_fees.unwrap_or_default(),
            financing: parse_financing_flags(&args.financing, &catalog)?,
        }
    };

    let output = calculate_quote(&quote_input, &catalog)?;

    // envelope with the presentation-rounded result
    let mut value = serde_json::to_value(&output)?;
    value["result"] = serde_json::to_value(output.result.rounded())?;
    Ok(value)
}

/// Parse repeated `--financing key=amount:rate` flags.
fn parse_financing_flags(
    flags: &[String],
    catalog: &FinancingCatalog,
) -> Result<Vec<FinancingLine>, Box<dyn std::error::Error>> {
    let mut lines = Vec::new();
    for flag in flags {
        let (key, amounts) = flag
            .split_once('=')
            .ok_or_else(|| format!("Expected key=amount:rate, got '{flag}'"))?;
        let (amount, rate) = amounts
            .split_once(':')
            .ok_or_else(|| format!("Expected key=amount:rate, got '{flag}'"))?;
        let amount: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| format!("Invalid amount in '{flag}'"))?;
        let rate: Decimal = rate
            .trim()
            .parse()
            .map_err(|_| format!("Invalid rate in '{flag}'"))?;
        let display_name = catalog
            .get(key)
            .map(|e| e.display_name.clone())
            .unwrap_or_else(|| key.to_string());
        lines.push(FinancingLine {
            key: key.to_string(),
            display_name,
            amount_financed: amount,
            rate,
        });
    }
    Ok(lines)
}
