//! `restock` — run the forecasting/optimization pipeline over a sales CSV
//! and print order recommendations.

mod ingest;
mod render;

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use restock_demand::{Bucket, CostOverrides, Transaction};
use restock_optimizer::Engine;
use restock_pipeline::{PipelineOptions, run};

const SAMPLE_SALES: &str = include_str!("../data/sales_history.csv");

/// Demand forecasting and order-quantity recommendation over sales history.
#[derive(Debug, Parser)]
#[command(name = "restock", version, about)]
struct Cli {
    /// Sales history CSV with columns date, sku, quantity.
    /// The bundled sample dataset is used when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Optional per-SKU cost CSV (sku, unit_cost, holding_cost,
    /// stockout_penalty, volume); blank cells fall back to defaults.
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Aggregation bucket width: daily, weekly or monthly.
    #[arg(long, default_value = "weekly")]
    bucket: Bucket,

    /// Number of trailing buckets feeding the forecast (minimum 2).
    #[arg(long, default_value_t = restock_core::DEFAULT_FORECAST_WINDOW)]
    window: usize,

    /// Maximum total purchasing spend; omit or 0 for unconstrained.
    #[arg(long)]
    budget: Option<f64>,

    /// Maximum total storage volume; omit or 0 for unconstrained.
    #[arg(long)]
    capacity: Option<f64>,

    /// Solver engine: exact or local.
    #[arg(long, default_value = "exact")]
    engine: Engine,

    /// Print the report as JSON instead of text tables.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    restock_observability::init();
    let cli = Cli::parse();

    let transactions = load_transactions(cli.input.as_deref())?;
    let overrides = match &cli.costs {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            ingest::read_cost_overrides(file)
                .with_context(|| format!("reading {}", path.display()))?
        }
        None => CostOverrides::new(),
    };

    let options = PipelineOptions {
        bucket: cli.bucket,
        window: cli.window,
        budget: cli.budget,
        capacity: cli.capacity,
        engine: cli.engine,
        overrides,
        ..PipelineOptions::default()
    };

    let outcome = run(&transactions, &options)?;

    let stdout = std::io::stdout().lock();
    if cli.json {
        render::json(&outcome, stdout)?;
    } else {
        render::text(&outcome, stdout)?;
    }
    Ok(())
}

fn load_transactions(input: Option<&std::path::Path>) -> anyhow::Result<Vec<Transaction>> {
    match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            ingest::read_sales(file).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            tracing::info!("no --input given, using the bundled sample dataset");
            ingest::read_sales(SAMPLE_SALES.as_bytes())
        }
    }
}
