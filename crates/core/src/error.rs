//! Domain error model.

use thiserror::Error;

/// Result type used across the pipeline stages.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic caller-programming failures (malformed
/// parameters, bad configuration). Solver failures and malformed data rows are
/// *not* errors here — stages degrade and log instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stage input failed validation (e.g. non-finite or negative field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value was out of contract.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
