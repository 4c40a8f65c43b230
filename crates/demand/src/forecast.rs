//! Baseline demand forecasting over a trailing window of buckets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use restock_core::{CostDefaults, SkuId};

use crate::series::DemandSeries;

/// Per-item demand estimate plus the cost coefficients the optimizer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemParameters {
    pub sku: SkuId,
    pub mean_demand: f64,
    pub demand_std: f64,
    pub unit_cost: f64,
    pub holding_cost: f64,
    pub stockout_penalty: f64,
    pub volume: f64,
}

/// Partial per-SKU cost data supplied by the caller.
///
/// Each field is individually optional; absent fields fall back to
/// [`CostDefaults`]. A present value is never overwritten by a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostOverride {
    pub unit_cost: Option<f64>,
    pub holding_cost: Option<f64>,
    pub stockout_penalty: Option<f64>,
    pub volume: Option<f64>,
}

/// Caller-supplied cost overrides keyed by SKU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostOverrides {
    by_sku: HashMap<SkuId, CostOverride>,
}

impl CostOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sku: SkuId, costs: CostOverride) {
        self.by_sku.insert(sku, costs);
    }

    pub fn is_empty(&self) -> bool {
        self.by_sku.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_sku.len()
    }

    /// Effective coefficients for `sku`: override fields where present,
    /// defaults everywhere else.
    pub fn resolve(&self, sku: &SkuId, defaults: &CostDefaults) -> CostDefaults {
        let overrides = self.by_sku.get(sku).copied().unwrap_or_default();
        CostDefaults {
            unit_cost: overrides.unit_cost.unwrap_or(defaults.unit_cost),
            holding_cost: overrides.holding_cost.unwrap_or(defaults.holding_cost),
            stockout_penalty: overrides
                .stockout_penalty
                .unwrap_or(defaults.stockout_penalty),
            volume: overrides.volume.unwrap_or(defaults.volume),
        }
    }
}

/// Compute per-item demand parameters from aggregated series.
///
/// For each SKU the last `window` buckets are used (fewer when history is
/// shorter; never padded, never an error). `mean_demand` is the arithmetic
/// mean floored at 0; `demand_std` is the population standard deviation when
/// at least two observations exist, else 0. An item with no observations
/// yields zero demand plus its resolved costs.
///
/// `window` must be >= 2 at the boundary; the pipeline crate validates that
/// before calling in.
pub fn forecast(
    series: &[DemandSeries],
    window: usize,
    defaults: &CostDefaults,
    overrides: &CostOverrides,
) -> Vec<ItemParameters> {
    series
        .iter()
        .map(|s| {
            let quantities: Vec<f64> = s.recent(window).iter().map(|p| p.quantity).collect();
            let mean_demand = mean(&quantities).max(0.0);
            let demand_std = if quantities.len() >= 2 {
                stddev_population(&quantities, mean(&quantities)).max(0.0)
            } else {
                0.0
            };
            let costs = overrides.resolve(&s.sku, defaults);

            ItemParameters {
                sku: s.sku.clone(),
                mean_demand,
                demand_std,
                unit_cost: costs.unit_cost,
                holding_cost: costs.holding_cost,
                stockout_penalty: costs.stockout_penalty,
                volume: costs.volume,
            }
        })
        .collect()
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (divisor n), deterministic.
fn stddev_population(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let var = xs
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}
