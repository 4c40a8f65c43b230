//! `restock-demand` — demand aggregation and baseline forecasting.
//!
//! The first two pipeline stages: raw sales transactions are cleaned and
//! resampled into per-SKU period series, then summarized into per-item
//! demand/cost parameters for the optimizer. Both stages are lenient by
//! contract: malformed rows are dropped, sparse history is zero-filled, and
//! neither stage ever fails.

pub mod aggregate;
pub mod forecast;
pub mod series;
pub mod transaction;

pub use aggregate::{Bucket, aggregate};
pub use forecast::{CostOverride, CostOverrides, ItemParameters, forecast};
pub use series::{DemandPoint, DemandSeries};
pub use transaction::Transaction;
