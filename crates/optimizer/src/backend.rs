//! Solver backend strategy: interchangeable engines behind one contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use restock_core::DomainError;

use crate::problem::Problem;

/// A pluggable solver for the joint constrained problem.
///
/// Backends may disagree on the chosen point when the optimum is degenerate,
/// but must agree on the objective value within tolerance. Failure is
/// reported through `SolverError`, never panicked; the optimizer maps it to
/// the fallback heuristic.
pub trait SolverBackend {
    fn name(&self) -> &'static str;

    fn solve(&self, problem: &Problem) -> Result<Vec<f64>, SolverError>;
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("backend failed: {0}")]
    Backend(String),

    #[error("did not converge: {0}")]
    NonConvergence(String),
}

/// Engine selection: which backend solves constrained problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Exact LP reformulation (auxiliary overstock/understock variables).
    #[default]
    Exact,
    /// Deterministic projected-subgradient local search.
    Local,
}

impl Engine {
    pub(crate) fn backend(self) -> Box<dyn SolverBackend> {
        match self {
            Engine::Exact => Box::new(crate::lp::ExactBackend),
            Engine::Local => Box::new(crate::descent::LocalBackend::default()),
        }
    }
}

impl core::fmt::Display for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Engine::Exact => "exact",
            Engine::Local => "local",
        };
        f.write_str(name)
    }
}

impl core::str::FromStr for Engine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "lp" => Ok(Engine::Exact),
            "local" | "descent" => Ok(Engine::Local),
            other => Err(DomainError::invalid_config(format!(
                "unknown solver engine: {other}"
            ))),
        }
    }
}
