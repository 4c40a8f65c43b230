//! The optimizer contract: validation, fast paths, dispatch, fallback.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use restock_core::{DomainError, DomainResult};
use restock_demand::ItemParameters;

use crate::backend::{Engine, SolverBackend};
use crate::problem::Problem;

/// An item's parameters plus the recommended order quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub item: ItemParameters,
    pub order_quantity: f64,
}

/// Recommend an order quantity per item, minimizing total expected cost
/// under the optional budget and capacity constraints.
///
/// The result has the same cardinality and order as `items`. An absent or
/// non-positive bound means unconstrained. Solver failure is never
/// propagated: the feasibility-scaled starting point is returned instead.
/// The only `Err` class is caller programming error — a non-finite or
/// negative parameter field, or a non-finite/negative bound.
pub fn optimize(
    items: &[ItemParameters],
    budget: Option<f64>,
    capacity: Option<f64>,
    engine: Engine,
) -> DomainResult<Vec<OptimizationResult>> {
    validate(items, budget, capacity)?;

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let budget = active_bound(budget);
    let capacity = active_bound(capacity);

    let quantities = if items.iter().all(|i| i.mean_demand == 0.0) {
        // Zero demand everywhere: ordering nothing is optimal and feasible.
        vec![0.0; items.len()]
    } else if budget.is_none() && capacity.is_none() {
        debug!(items = items.len(), "no active constraint, separable solve");
        separable_optimum(items)
    } else {
        let problem = Problem::new(items, budget, capacity);
        constrained_quantities(&problem, engine.backend().as_ref())
    };

    Ok(items
        .iter()
        .cloned()
        .zip(quantities)
        .map(|(item, order_quantity)| OptimizationResult {
            item,
            order_quantity,
        })
        .collect())
}

fn constrained_quantities(problem: &Problem, backend: &dyn SolverBackend) -> Vec<f64> {
    match backend.solve(problem) {
        Ok(q) => q.into_iter().map(|v| v.max(0.0)).collect(),
        Err(err) => {
            warn!(
                backend = backend.name(),
                error = %err,
                "solver failed; returning scaled-demand fallback"
            );
            problem.start.clone()
        }
    }
}

/// With no coupling constraint the objective separates per item into a
/// piecewise-linear cost with slope `unit_cost - stockout_penalty` below the
/// demand point and `unit_cost + holding_cost` above it. The minimum sits at
/// the demand point when the stockout penalty covers the unit cost, at zero
/// otherwise.
fn separable_optimum(items: &[ItemParameters]) -> Vec<f64> {
    items
        .iter()
        .map(|i| {
            if i.stockout_penalty >= i.unit_cost {
                i.mean_demand.max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

fn active_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| *b > 0.0)
}

fn validate(
    items: &[ItemParameters],
    budget: Option<f64>,
    capacity: Option<f64>,
) -> DomainResult<()> {
    for item in items {
        let fields = [
            ("mean_demand", item.mean_demand),
            ("demand_std", item.demand_std),
            ("unit_cost", item.unit_cost),
            ("holding_cost", item.holding_cost),
            ("stockout_penalty", item.stockout_penalty),
            ("volume", item.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::invalid_input(format!(
                    "item {}: {name} must be finite and non-negative, got {value}",
                    item.sku
                )));
            }
        }
    }
    for (name, bound) in [("budget", budget), ("capacity", capacity)] {
        if let Some(value) = bound {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::invalid_input(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolverError;
    use proptest::prelude::*;
    use restock_core::SkuId;

    fn item(sku: &str, demand: f64) -> ItemParameters {
        ItemParameters {
            sku: SkuId::new(sku),
            mean_demand: demand,
            demand_std: 0.0,
            unit_cost: 10.0,
            holding_cost: 2.0,
            stockout_penalty: 15.0,
            volume: 1.0,
        }
    }

    struct FailingBackend;

    impl SolverBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn solve(&self, _problem: &Problem) -> Result<Vec<f64>, SolverError> {
            Err(SolverError::NonConvergence("test backend".to_string()))
        }
    }

    #[test]
    fn empty_items_yield_empty_result_without_solving() {
        let result = optimize(&[], Some(100.0), Some(100.0), Engine::Exact).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn non_finite_parameters_are_a_caller_error() {
        let mut bad = item("A", 10.0);
        bad.unit_cost = f64::NAN;
        let err = optimize(&[bad], None, None, Engine::Exact).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn negative_parameters_are_a_caller_error() {
        let mut bad = item("A", 10.0);
        bad.volume = -1.0;
        let err = optimize(&[bad], None, None, Engine::Exact).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn negative_bounds_are_a_caller_error() {
        let err = optimize(&[item("A", 10.0)], Some(-5.0), None, Engine::Exact).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn zero_bounds_mean_unconstrained() {
        let result = optimize(&[item("A", 100.0)], Some(0.0), Some(0.0), Engine::Exact).unwrap();
        assert_eq!(result[0].order_quantity, 100.0);
    }

    #[test]
    fn unconstrained_optimum_is_mean_demand_when_penalty_covers_cost() {
        let items = vec![item("A", 100.0), item("B", 35.5)];
        for engine in [Engine::Exact, Engine::Local] {
            let result = optimize(&items, None, None, engine).unwrap();
            assert_eq!(result[0].order_quantity, 100.0);
            assert_eq!(result[1].order_quantity, 35.5);
        }
    }

    #[test]
    fn unconstrained_optimum_is_zero_when_shortage_is_cheaper_than_buying() {
        let mut cheap = item("A", 100.0);
        cheap.stockout_penalty = 5.0;
        let result = optimize(&[cheap], None, None, Engine::Exact).unwrap();
        assert_eq!(result[0].order_quantity, 0.0);
    }

    #[test]
    fn all_zero_demand_yields_exactly_zero_orders() {
        let items = vec![item("A", 0.0), item("B", 0.0)];
        let result = optimize(&items, Some(500.0), Some(200.0), Engine::Exact).unwrap();
        assert_eq!(result[0].order_quantity, 0.0);
        assert_eq!(result[1].order_quantity, 0.0);
    }

    #[test]
    fn binding_budget_caps_the_order() {
        for engine in [Engine::Exact, Engine::Local] {
            let result = optimize(&[item("A", 100.0)], Some(500.0), None, engine).unwrap();
            assert!(
                (result[0].order_quantity - 50.0).abs() < 1e-6,
                "engine {engine}: got {}",
                result[0].order_quantity
            );
        }
    }

    #[test]
    fn engines_agree_on_the_objective_of_a_constrained_problem() {
        let items = vec![item("A", 100.0), item("B", 60.0)];
        let problem = Problem::new(&items, Some(900.0), None);

        let exact = optimize(&items, Some(900.0), None, Engine::Exact).unwrap();
        let local = optimize(&items, Some(900.0), None, Engine::Local).unwrap();
        let q_exact: Vec<f64> = exact.iter().map(|r| r.order_quantity).collect();
        let q_local: Vec<f64> = local.iter().map(|r| r.order_quantity).collect();

        assert!((problem.objective(&q_exact) - problem.objective(&q_local)).abs() < 1e-6);
    }

    #[test]
    fn failed_solver_degrades_to_the_scaled_start() {
        let problem = Problem::new(&[item("A", 100.0)], Some(500.0), None);
        let q = constrained_quantities(&problem, &FailingBackend);
        // 0.95 * 500 / 1000 * 100
        assert!((q[0] - 47.5).abs() < 1e-12);
        assert!(problem.spend(&q) <= 500.0);
    }

    #[test]
    fn result_keeps_input_cardinality_and_order() {
        let items = vec![item("C", 10.0), item("A", 20.0), item("B", 0.0)];
        let result = optimize(&items, Some(10_000.0), None, Engine::Exact).unwrap();
        let skus: Vec<&str> = result.iter().map(|r| r.item.sku.as_str()).collect();
        assert_eq!(skus, vec!["C", "A", "B"]);
    }

    fn arbitrary_items() -> impl Strategy<Value = Vec<ItemParameters>> {
        proptest::collection::vec(
            (0.0f64..200.0, 0.1f64..20.0, 0.0f64..10.0, 0.0f64..30.0, 0.1f64..5.0),
            1..6,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (demand, unit, holding, penalty, volume))| ItemParameters {
                    sku: SkuId::new(format!("SKU-{i}")),
                    mean_demand: demand,
                    demand_std: 0.0,
                    unit_cost: unit,
                    holding_cost: holding,
                    stockout_penalty: penalty,
                    volume,
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: for any non-negative inputs and any engine, every
        /// recommended quantity is non-negative and both bounds hold within
        /// solver tolerance.
        #[test]
        fn orders_are_nonnegative_and_feasible(
            items in arbitrary_items(),
            budget in proptest::option::of(1.0f64..5_000.0),
            capacity in proptest::option::of(1.0f64..2_000.0),
            use_local in any::<bool>(),
        ) {
            let engine = if use_local { Engine::Local } else { Engine::Exact };
            let result = optimize(&items, budget, capacity, engine).unwrap();
            prop_assert_eq!(result.len(), items.len());

            let q: Vec<f64> = result.iter().map(|r| r.order_quantity).collect();
            prop_assert!(q.iter().all(|v| *v >= 0.0));

            let problem = Problem::new(&items, budget, capacity);
            if let Some(b) = budget {
                prop_assert!(problem.spend(&q) <= b + 1e-6 * (1.0 + b));
            }
            if let Some(c) = capacity {
                prop_assert!(problem.space(&q) <= c + 1e-6 * (1.0 + c));
            }
        }
    }
}
