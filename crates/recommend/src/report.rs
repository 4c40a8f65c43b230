use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use restock_core::SkuId;

/// Metric names used in [`RecommendationReport::metrics`].
pub mod metric {
    pub const TOTAL_PURCHASING_COST: &str = "total_purchasing_cost";
    pub const TOTAL_HOLDING_COST: &str = "total_holding_cost";
    pub const TOTAL_SHORTAGE_COST: &str = "total_shortage_cost";
    pub const TOTAL_COST: &str = "total_cost";
    pub const BUDGET_USED: &str = "budget_used";
    pub const BUDGET_UTILIZATION: &str = "budget_utilization";
    pub const CAPACITY_USED: &str = "capacity_used";
    pub const CAPACITY_UTILIZATION: &str = "capacity_utilization";
    pub const N_SKUS: &str = "n_skus";
}

/// Per-SKU cost decomposition at the recommended order quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuCost {
    pub sku: SkuId,
    pub mean_demand: f64,
    pub order_quantity: f64,
    pub purchasing_cost: f64,
    pub holding_cost: f64,
    pub shortage_cost: f64,
    pub total_cost: f64,
}

/// Aggregate metrics, per-SKU breakdown and ordered insight messages.
///
/// `metrics` keys are the constants in [`metric`]. The utilization keys are
/// absent — not zero — when the corresponding constraint was unset, so a
/// consumer can tell "no constraint" from "0% used". Messages follow a fixed
/// priority: overall breakdown, budget note, capacity note, top-cost SKUs,
/// over-ordered SKUs, under-ordered SKUs, dominant-cost-type note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub metrics: BTreeMap<String, f64>,
    pub per_item: Vec<SkuCost>,
    pub messages: Vec<String>,
}

impl RecommendationReport {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}
