//! Packed coefficient form of the joint order-quantity problem.

use restock_demand::ItemParameters;

/// Coefficient vectors for the joint problem, the normalized constraint
/// bounds, and the feasibility-scaled starting point.
///
/// `start` doubles as the guaranteed fallback result: it begins at mean
/// demand and is scaled down by `0.95 * bound / usage` per violated
/// constraint, so it is feasible-biased even when the solver never runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub demand: Vec<f64>,
    pub unit_cost: Vec<f64>,
    pub holding_cost: Vec<f64>,
    pub stockout_penalty: Vec<f64>,
    pub volume: Vec<f64>,
    /// Active budget bound (> 0), or unconstrained.
    pub budget: Option<f64>,
    /// Active capacity bound (> 0), or unconstrained.
    pub capacity: Option<f64>,
    pub start: Vec<f64>,
}

impl Problem {
    pub fn new(items: &[ItemParameters], budget: Option<f64>, capacity: Option<f64>) -> Self {
        let mut problem = Self {
            demand: items.iter().map(|i| i.mean_demand.max(0.0)).collect(),
            unit_cost: items.iter().map(|i| i.unit_cost).collect(),
            holding_cost: items.iter().map(|i| i.holding_cost).collect(),
            stockout_penalty: items.iter().map(|i| i.stockout_penalty).collect(),
            volume: items.iter().map(|i| i.volume).collect(),
            budget,
            capacity,
            start: Vec::new(),
        };
        problem.start = problem.scaled_start();
        problem
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }

    /// Total expected cost at `q`: purchasing plus holding on the overstock
    /// part plus penalty on the understock part.
    pub fn objective(&self, q: &[f64]) -> f64 {
        let mut total = 0.0;
        for i in 0..self.len() {
            let overstock = (q[i] - self.demand[i]).max(0.0);
            let understock = (self.demand[i] - q[i]).max(0.0);
            total += self.unit_cost[i] * q[i]
                + self.holding_cost[i] * overstock
                + self.stockout_penalty[i] * understock;
        }
        total
    }

    /// Purchasing spend at `q`.
    pub fn spend(&self, q: &[f64]) -> f64 {
        dot(&self.unit_cost, q)
    }

    /// Space usage at `q`.
    pub fn space(&self, q: &[f64]) -> f64 {
        dot(&self.volume, q)
    }

    fn scaled_start(&self) -> Vec<f64> {
        let mut start = self.demand.clone();

        if let Some(budget) = self.budget {
            let spend = dot(&self.unit_cost, &start);
            if spend > budget && spend > 0.0 {
                let scale = 0.95 * budget / spend;
                for q in &mut start {
                    *q *= scale;
                }
            }
        }
        if let Some(capacity) = self.capacity {
            let used = dot(&self.volume, &start);
            if used > capacity && used > 0.0 {
                let scale = 0.95 * capacity / used;
                for q in &mut start {
                    *q *= scale;
                }
            }
        }
        for q in &mut start {
            if *q < 0.0 {
                *q = 0.0;
            }
        }
        start
    }
}

pub(crate) fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(values)
        .map(|(c, v)| c * v)
        .sum()
}
