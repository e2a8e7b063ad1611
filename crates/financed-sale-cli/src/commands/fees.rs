use clap::Args;
use serde_json::Value;

use financed_sale_core::input::fees::parse_fee_list;

/// Arguments for manual fee-list parsing
#[derive(Args)]
pub struct FeesArgs {
    /// Comma-separated fee percentages, e.g. "4.5, 3"
    #[arg(long)]
    pub list: String,
}

pub fn run_fees(args: FeesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fees = parse_fee_list(&args.list)?;
    Ok(serde_json::to_value(fees)?)
}
