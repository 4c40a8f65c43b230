//! `restock-core` — foundation building blocks shared by every pipeline stage.
//!
//! This crate contains **pure domain** primitives (no IO, no stage logic).

pub mod config;
pub mod error;
pub mod sku;

pub use config::{CostDefaults, DEFAULT_FORECAST_WINDOW};
pub use error::{DomainError, DomainResult};
pub use sku::SkuId;
