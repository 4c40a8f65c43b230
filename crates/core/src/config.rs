//! Shared configuration values.
//!
//! Defaults are plain values threaded into the stages that need them, never
//! module-level mutable state, so every pipeline run stays pure and testable.

use serde::{Deserialize, Serialize};

/// Default unit purchase cost applied when an item carries no override.
pub const DEFAULT_UNIT_COST: f64 = 10.0;

/// Default holding cost per unit of overstock.
pub const DEFAULT_HOLDING_COST: f64 = 1.0;

/// Default penalty per unit of unmet demand.
pub const DEFAULT_STOCKOUT_PENALTY: f64 = 5.0;

/// Default space consumed per unit.
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Default number of trailing buckets feeding the forecast.
pub const DEFAULT_FORECAST_WINDOW: usize = 8;

/// Cost coefficients used for items without explicit cost data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDefaults {
    pub unit_cost: f64,
    pub holding_cost: f64,
    pub stockout_penalty: f64,
    pub volume: f64,
}

impl Default for CostDefaults {
    fn default() -> Self {
        Self {
            unit_cost: DEFAULT_UNIT_COST,
            holding_cost: DEFAULT_HOLDING_COST,
            stockout_penalty: DEFAULT_STOCKOUT_PENALTY,
            volume: DEFAULT_VOLUME,
        }
    }
}
