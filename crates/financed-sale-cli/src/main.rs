mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::decompose::DecomposeArgs;
use commands::fees::FeesArgs;
use commands::quote::QuoteArgs;

/// Financed-sale pricing calculations
#[derive(Parser)]
#[command(
    name = "fsale",
    version,
    about = "Financed-sale pricing calculations",
    long_about = "Computes financed-sale quotes with decimal precision: \
                  tax/shipping decomposition of a tax-inclusive total, bank \
                  fee aggregation across financing sources, and net/profit \
                  figures for the fees-absorbed and fees-passed-through \
                  scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full financed-sale quote
    Quote(QuoteArgs),
    /// Split a tax-inclusive total into shipping, base and tax
    Decompose(DecomposeArgs),
    /// Parse a manual bank-fee list and show rates and total
    Fees(FeesArgs),
    /// Print the active financing catalog
    Catalog(CatalogArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::quote::run_quote(args),
        Commands::Decompose(args) => commands::decompose::run_decompose(args),
        Commands::Fees(args) => commands::fees::run_fees(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("fsale {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
