//! `restock-pipeline` — the synchronous four-stage composition.
//!
//! One invocation runs aggregate → forecast → optimize → summarize as a
//! pure, stateless function chain. No stage mutates shared state, so
//! concurrent invocations need no coordination provided each owns its
//! inputs. The only potentially slow step is the optimizer's solver call,
//! which is blocking; callers wanting responsiveness run the whole
//! invocation on their own worker thread with their own timeout.

use thiserror::Error;
use tracing::info;

use restock_core::{CostDefaults, DEFAULT_FORECAST_WINDOW, DomainError};
use restock_demand::{
    Bucket, CostOverrides, DemandSeries, ItemParameters, Transaction, aggregate, forecast,
};
use restock_optimizer::{Engine, OptimizationResult, optimize};
use restock_recommend::{RecommendationReport, summarize};

/// The forecast window must cover at least two buckets to carry a
/// dispersion estimate.
pub const MIN_FORECAST_WINDOW: usize = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("forecast window must be at least {MIN_FORECAST_WINDOW} buckets, got {0}")]
    Window(usize),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub bucket: Bucket,
    pub window: usize,
    pub budget: Option<f64>,
    pub capacity: Option<f64>,
    pub engine: Engine,
    pub defaults: CostDefaults,
    pub overrides: CostOverrides,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            bucket: Bucket::Weekly,
            window: DEFAULT_FORECAST_WINDOW,
            budget: None,
            capacity: None,
            engine: Engine::default(),
            defaults: CostDefaults::default(),
            overrides: CostOverrides::default(),
        }
    }
}

/// Everything a presentation layer may want to show: the intermediate
/// artifacts of each stage plus the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub series: Vec<DemandSeries>,
    pub parameters: Vec<ItemParameters>,
    pub orders: Vec<OptimizationResult>,
    pub report: RecommendationReport,
}

/// Run the full pipeline over one owned set of transactions.
pub fn run(
    transactions: &[Transaction],
    options: &PipelineOptions,
) -> Result<PipelineOutcome, PipelineError> {
    if options.window < MIN_FORECAST_WINDOW {
        return Err(PipelineError::Window(options.window));
    }

    let series = aggregate(transactions, options.bucket);
    info!(
        rows = transactions.len(),
        skus = series.len(),
        bucket = %options.bucket,
        "aggregated transactions"
    );

    let parameters = forecast(&series, options.window, &options.defaults, &options.overrides);
    info!(items = parameters.len(), window = options.window, "forecast ready");

    let orders = optimize(&parameters, options.budget, options.capacity, options.engine)?;
    info!(items = orders.len(), engine = %options.engine, "order quantities solved");

    let report = summarize(&orders, options.budget, options.capacity);

    Ok(PipelineOutcome {
        series,
        parameters,
        orders,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_recommend::metric;

    fn tx(date: &str, sku: &str, quantity: &str) -> Transaction {
        Transaction::new(date, sku, quantity)
    }

    fn monday(week: u64) -> String {
        let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (base + chrono::Days::new(7 * week)).to_string()
    }

    /// Eight weekly buckets of steady demand for two SKUs.
    fn steady_history() -> Vec<Transaction> {
        let mut txs = Vec::new();
        for week in 0..8 {
            txs.push(tx(&monday(week), "A", "20"));
            txs.push(tx(&monday(week), "B", "10"));
        }
        txs
    }

    #[test]
    fn window_below_two_is_rejected() {
        let options = PipelineOptions {
            window: 1,
            ..PipelineOptions::default()
        };
        let err = run(&[], &options).unwrap_err();
        assert!(matches!(err, PipelineError::Window(1)));
    }

    #[test]
    fn empty_input_flows_through_to_the_no_data_report() {
        let outcome = run(&[], &PipelineOptions::default()).unwrap();
        assert!(outcome.series.is_empty());
        assert!(outcome.parameters.is_empty());
        assert!(outcome.orders.is_empty());
        assert!(outcome.report.metrics.is_empty());
        assert_eq!(outcome.report.messages.len(), 1);
    }

    #[test]
    fn steady_demand_round_trips_to_a_full_report() {
        let mut overrides = CostOverrides::new();
        // Make shortage expensive so the unconstrained optimum sits at
        // mean demand for both SKUs.
        for sku in ["A", "B"] {
            overrides.insert(
                restock_core::SkuId::new(sku),
                restock_demand::CostOverride {
                    stockout_penalty: Some(15.0),
                    ..Default::default()
                },
            );
        }
        let options = PipelineOptions {
            overrides,
            ..PipelineOptions::default()
        };

        let outcome = run(&steady_history(), &options).unwrap();
        assert_eq!(outcome.series.len(), 2);
        assert_eq!(outcome.parameters.len(), 2);
        assert_eq!(outcome.orders.len(), 2);
        assert_eq!(outcome.orders[0].order_quantity, 20.0);
        assert_eq!(outcome.orders[1].order_quantity, 10.0);
        assert_eq!(
            outcome.report.metric(metric::N_SKUS),
            Some(2.0)
        );
        // 20 * 10 + 10 * 10 purchasing, nothing over or under.
        assert_eq!(
            outcome.report.metric(metric::TOTAL_COST),
            Some(300.0)
        );
    }

    #[test]
    fn budget_flows_into_both_optimizer_and_report() {
        let mut overrides = CostOverrides::new();
        overrides.insert(
            restock_core::SkuId::new("A"),
            restock_demand::CostOverride {
                stockout_penalty: Some(15.0),
                ..Default::default()
            },
        );
        let options = PipelineOptions {
            budget: Some(100.0),
            overrides,
            ..PipelineOptions::default()
        };
        let txs: Vec<Transaction> = (0..8).map(|week| tx(&monday(week), "A", "20")).collect();

        let outcome = run(&txs, &options).unwrap();
        // Demand 20/week at unit cost 10 wants 200; budget caps it at 10.
        assert!((outcome.orders[0].order_quantity - 10.0).abs() < 1e-6);
        let utilization = outcome.report.metric(metric::BUDGET_UTILIZATION).unwrap();
        assert!((utilization - 1.0).abs() < 1e-6);
    }
}
