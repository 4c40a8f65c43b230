//! `restock-recommend` — cost decomposition and qualitative insights.
//!
//! The last pipeline stage: turns optimizer output into aggregate metrics, a
//! per-SKU cost breakdown and a fixed-priority list of human-readable
//! insight messages. Never fails; degenerate input yields a minimal report.

pub mod report;
pub mod summarize;

pub use report::{RecommendationReport, SkuCost, metric};
pub use summarize::summarize;
