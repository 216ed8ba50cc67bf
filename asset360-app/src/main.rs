use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod workflow;

/// Generates a synthetic, referentially consistent manufacturing dataset as CSV tables.
#[derive(Parser, Debug)]
#[command(name = "asset360", version, about)]
struct Args {
    /// YAML catalog file
    #[arg(long, default_value = "asset360-app/config.yaml")]
    config: PathBuf,

    /// Directory the tables are written to. Existing tables are overwritten.
    #[arg(long, default_value = "./data")]
    output_dir: PathBuf,

    /// Random seed; overrides the catalog's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Reference "now" (RFC 3339 or YYYY-MM-DDTHH:MM:SS); defaults to the current UTC time
    #[arg(long, value_parser = parse_reference_time)]
    as_of: Option<NaiveDateTime>,

    /// Overrides the catalog's num_products
    #[arg(long)]
    num_products: Option<usize>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_reference_time(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("invalid reference time '{}': {}", value, e))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("--- Asset360 Data Generator ---");

    let catalog = config::load_catalog(&args.config)?;
    let options = workflow::RunOptions {
        output_dir: args.output_dir,
        seed: args.seed,
        reference_time: args.as_of,
        num_products: args.num_products,
    };

    let report = workflow::run(catalog, &options)?;

    println!(
        "\nGeneration complete: {} rows across {} tables (seed {}). Results are in '{}'",
        report.total_rows,
        report.tables,
        report.seed,
        options.output_dir.display()
    );

    Ok(())
}
