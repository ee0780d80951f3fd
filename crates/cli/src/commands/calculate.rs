//! One-shot allocation from a request file.
//!
//! Reads a request in the same JSON shape `POST /calculate` accepts and
//! prints the resulting table.

use anyhow::{Context, Result};
use clap::Args;
use index_fund_core::{AllocationRecord, AllocationRequest};
use std::io::Read;

/// Arguments for the calculate command.
#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    /// Request JSON file (`-` reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Print the table as JSON instead of one line per asset
    #[arg(long)]
    pub json: bool,

    /// Currency label shown next to prices (e.g., "ZAR")
    #[arg(long)]
    pub currency: Option<String>,
}

/// Runs the calculate command.
///
/// # Errors
/// Returns an error if the input cannot be read or parsed, or if the
/// allocator rejects the request.
pub fn run_calculate(args: &CalculateArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    let request: AllocationRequest =
        serde_json::from_str(&raw).context("Input is not a valid allocation request")?;

    tracing::info!(
        "Allocating {} of {} across {} asset(s)",
        request.asset_cap,
        request.total_capital,
        request.assets.len()
    );

    let records = request.compute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", format_record(record, args.currency.as_deref()));
        }
    }

    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read request file: {path}"))
}

/// `BTC: 57.14% (3.57 units at ZAR 80)`
fn format_record(record: &AllocationRecord, currency: Option<&str>) -> String {
    let price = match currency {
        Some(code) => format!("{code} {}", record.price),
        None => record.price.to_string(),
    };

    format!(
        "{}: {:.2}% ({:.2} units at {})",
        record.symbol, record.allocation_percentage, record.amount, price
    )
}
