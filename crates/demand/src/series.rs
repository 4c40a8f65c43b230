use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use restock_core::SkuId;

/// Aggregated demand for one SKU in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub period_start: NaiveDate,
    pub quantity: f64,
}

/// Per-SKU demand time series.
///
/// Points are chronological and contiguous at the bucket width chosen during
/// aggregation; there is at most one point per period. Periods with no
/// transactions inside the SKU's observed span carry quantity 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    pub sku: SkuId,
    pub points: Vec<DemandPoint>,
}

impl DemandSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The trailing `window` points (all of them when history is shorter).
    pub fn recent(&self, window: usize) -> &[DemandPoint] {
        let start = self.points.len().saturating_sub(window);
        &self.points[start..]
    }

    /// Sum of all period quantities.
    pub fn total_quantity(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }
}
