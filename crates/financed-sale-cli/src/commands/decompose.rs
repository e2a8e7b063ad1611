use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use financed_sale_core::pricing::decompose::{
    decompose, DecomposeInput, DEFAULT_SHIPPING, DEFAULT_TAX_RATE_PCT,
};

/// Arguments for tax/shipping decomposition
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DecomposeArgs {
    /// Customer-facing total price, tax and shipping inclusive
    #[arg(long)]
    pub total_price: Decimal,

    /// Tax rate in percent
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Whether the total includes the flat shipping charge
    #[arg(long)]
    pub include_shipping: Option<bool>,

    /// Flat shipping charge
    #[arg(long)]
    pub shipping_amount: Option<Decimal>,
}

pub fn run_decompose(args: DecomposeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let decomposition = decompose(&DecomposeInput {
        total_price: args.total_price,
        tax_rate_pct: args.tax_rate.unwrap_or(DEFAULT_TAX_RATE_PCT),
        include_shipping: args.include_shipping.unwrap_or(true),
        shipping_amount: args.shipping_amount.unwrap_or(DEFAULT_SHIPPING),
    })?;

    Ok(serde_json::json!({
        "shipping": decomposition.shipping.round_dp(2),
        "taxable_base": decomposition.taxable_base.round_dp(2),
        "tax_amount": decomposition.tax_amount.round_dp(2),
    }))
}
