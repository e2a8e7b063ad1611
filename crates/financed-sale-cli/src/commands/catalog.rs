use clap::Args;
use serde_json::Value;

use financed_sale_core::catalog::FinancingCatalog;

use crate::input;

/// Arguments for printing the financing catalog
#[derive(Args)]
pub struct CatalogArgs {
    /// Path to a financing catalog JSON file (defaults to the built-in table)
    #[arg(long)]
    pub catalog: Option<String>,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    Ok(serde_json::to_value(catalog.entries())?)
}

/// Load a catalog from a JSON file, or fall back to the built-in table.
pub fn load_catalog(path: Option<&str>) -> Result<FinancingCatalog, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(input::file::read_json(p)?),
        None => Ok(FinancingCatalog::default()),
    }
}
