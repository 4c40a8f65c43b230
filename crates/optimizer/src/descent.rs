//! Local engine: deterministic projected subgradient descent.
//!
//! The objective is piecewise linear, so a subgradient step with harmonic
//! decay plus a feasibility projection (clip to the non-negative orthant,
//! then proportional scale-down per violated constraint) tracks the
//! constrained optimum on this problem family. No randomness, fixed
//! iteration budget, best-feasible iterate wins.

use crate::backend::{SolverBackend, SolverError};
use crate::problem::Problem;

const STALL_LIMIT: usize = 50;

/// Projected-subgradient local engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBackend {
    pub max_iters: usize,
    pub tolerance: f64,
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self {
            max_iters: 600,
            tolerance: 1e-9,
        }
    }
}

impl SolverBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn solve(&self, problem: &Problem) -> Result<Vec<f64>, SolverError> {
        let n = problem.len();
        let mut x = problem.start.clone();
        project(problem, &mut x);

        let mut best = x.clone();
        let mut best_cost = problem.objective(&best);

        let scale = problem.demand.iter().copied().fold(1.0f64, f64::max);
        let mut stalled = 0usize;

        for iter in 0..self.max_iters {
            let mut gradient = vec![0.0; n];
            for i in 0..n {
                // Subgradient of the per-item piecewise-linear cost.
                gradient[i] = if x[i] < problem.demand[i] {
                    problem.unit_cost[i] - problem.stockout_penalty[i]
                } else if x[i] > problem.demand[i] {
                    problem.unit_cost[i] + problem.holding_cost[i]
                } else {
                    problem.unit_cost[i]
                };
            }
            let norm = gradient.iter().fold(0.0f64, |acc, g| acc.max(g.abs()));
            if norm == 0.0 {
                break;
            }

            let step = scale / (4.0 * (iter as f64 + 1.0) * norm);
            for i in 0..n {
                x[i] -= step * gradient[i];
            }
            project(problem, &mut x);

            let cost = problem.objective(&x);
            if cost + self.tolerance < best_cost {
                best_cost = cost;
                best.copy_from_slice(&x);
                stalled = 0;
            } else {
                stalled += 1;
                if stalled >= STALL_LIMIT {
                    break;
                }
            }
        }

        if best.iter().any(|q| !q.is_finite()) {
            return Err(SolverError::NonConvergence(
                "iterate left the finite range".to_string(),
            ));
        }
        Ok(best)
    }
}

/// Restore feasibility: clip to >= 0, then scale proportionally for each
/// violated constraint. Scaling factors are <= 1 and all coefficients are
/// non-negative, so the capacity scaling cannot re-violate the budget.
fn project(problem: &Problem, x: &mut [f64]) {
    for q in x.iter_mut() {
        if *q < 0.0 {
            *q = 0.0;
        }
    }
    if let Some(budget) = problem.budget {
        let spend = problem.spend(x);
        if spend > budget && spend > 0.0 {
            let scale = budget / spend;
            for q in x.iter_mut() {
                *q *= scale;
            }
        }
    }
    if let Some(capacity) = problem.capacity {
        let used = problem.space(x);
        if used > capacity && used > 0.0 {
            let scale = capacity / used;
            for q in x.iter_mut() {
                *q *= scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_core::SkuId;
    use restock_demand::ItemParameters;

    fn item(sku: &str, demand: f64, volume: f64) -> ItemParameters {
        ItemParameters {
            sku: SkuId::new(sku),
            mean_demand: demand,
            demand_std: 0.0,
            unit_cost: 10.0,
            holding_cost: 2.0,
            stockout_penalty: 15.0,
            volume,
        }
    }

    #[test]
    fn binding_budget_is_reached_from_below() {
        let problem = Problem::new(&[item("A", 100.0, 1.0)], Some(500.0), None);
        let q = LocalBackend::default().solve(&problem).unwrap();
        assert!((q[0] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn slack_constraints_keep_the_demand_point() {
        let problem = Problem::new(&[item("A", 100.0, 1.0)], Some(100_000.0), None);
        let q = LocalBackend::default().solve(&problem).unwrap();
        assert_eq!(q[0], 100.0);
    }

    #[test]
    fn symmetric_items_share_a_binding_capacity_evenly() {
        let problem = Problem::new(
            &[item("A", 100.0, 5.0), item("B", 100.0, 5.0)],
            None,
            Some(500.0),
        );
        let q = LocalBackend::default().solve(&problem).unwrap();
        assert!((q[0] - 50.0).abs() < 1e-9);
        assert!((q[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn cheap_shortage_walks_the_order_down() {
        let mut cheap = item("A", 100.0, 1.0);
        cheap.stockout_penalty = 5.0;
        let problem = Problem::new(&[cheap], Some(100_000.0), None);
        let q = LocalBackend::default().solve(&problem).unwrap();
        assert!(q[0] < 0.5, "expected near-zero order, got {}", q[0]);
    }

    #[test]
    fn projection_never_leaves_the_feasible_set() {
        let problem = Problem::new(
            &[item("A", 100.0, 2.0), item("B", 40.0, 1.0)],
            Some(700.0),
            Some(150.0),
        );
        let mut x = vec![500.0, -3.0];
        project(&problem, &mut x);
        assert!(x.iter().all(|q| *q >= 0.0));
        assert!(problem.spend(&x) <= 700.0 + 1e-9);
        assert!(problem.space(&x) <= 150.0 + 1e-9);
    }
}
