//! Report generation from optimizer output.

use std::collections::BTreeMap;

use restock_optimizer::OptimizationResult;

use crate::report::{RecommendationReport, SkuCost, metric};

const NO_DATA_MESSAGE: &str = "No data available for recommendations.";

/// Utilization above this is called out as near-binding, below
/// `SLACK_UTILIZATION` as not binding; nothing in between.
const TIGHT_UTILIZATION: f64 = 0.95;
const SLACK_UTILIZATION: f64 = 0.50;

/// Order quantities this far from mean demand get called out.
const OVER_ORDER_RATIO: f64 = 1.2;
const UNDER_ORDER_RATIO: f64 = 0.8;

/// One cost type "dominates" when it exceeds the other by this factor.
const DOMINANCE_RATIO: f64 = 1.5;

/// Compute the cost breakdown and high-level recommendations for a solved
/// order plan. Never fails: empty input yields an empty-metrics report with
/// a single "no data" message.
pub fn summarize(
    results: &[OptimizationResult],
    budget: Option<f64>,
    capacity: Option<f64>,
) -> RecommendationReport {
    if results.is_empty() {
        return RecommendationReport {
            metrics: BTreeMap::new(),
            per_item: Vec::new(),
            messages: vec![NO_DATA_MESSAGE.to_string()],
        };
    }

    let per_item: Vec<SkuCost> = results.iter().map(breakdown).collect();

    let total_purchasing: f64 = per_item.iter().map(|r| r.purchasing_cost).sum();
    let total_holding: f64 = per_item.iter().map(|r| r.holding_cost).sum();
    let total_shortage: f64 = per_item.iter().map(|r| r.shortage_cost).sum();
    let total_cost: f64 = per_item.iter().map(|r| r.total_cost).sum();

    let budget_used = total_purchasing;
    let budget_utilization = budget.filter(|b| *b > 0.0).map(|b| budget_used / b);

    let capacity_used: f64 = results
        .iter()
        .map(|r| r.item.volume * r.order_quantity)
        .sum();
    let capacity_utilization = capacity.filter(|c| *c > 0.0).map(|c| capacity_used / c);

    let mut metrics = BTreeMap::new();
    metrics.insert(metric::TOTAL_PURCHASING_COST.to_string(), total_purchasing);
    metrics.insert(metric::TOTAL_HOLDING_COST.to_string(), total_holding);
    metrics.insert(metric::TOTAL_SHORTAGE_COST.to_string(), total_shortage);
    metrics.insert(metric::TOTAL_COST.to_string(), total_cost);
    metrics.insert(metric::BUDGET_USED.to_string(), budget_used);
    metrics.insert(metric::CAPACITY_USED.to_string(), capacity_used);
    metrics.insert(metric::N_SKUS.to_string(), per_item.len() as f64);
    if let Some(utilization) = budget_utilization {
        metrics.insert(metric::BUDGET_UTILIZATION.to_string(), utilization);
    }
    if let Some(utilization) = capacity_utilization {
        metrics.insert(metric::CAPACITY_UTILIZATION.to_string(), utilization);
    }

    let mut messages = Vec::new();

    if total_cost > 0.0 {
        messages.push(format!(
            "Total cost breakdown: {:.1}% purchasing, {:.1}% holding, {:.1}% shortage.",
            total_purchasing / total_cost * 100.0,
            total_holding / total_cost * 100.0,
            total_shortage / total_cost * 100.0,
        ));
    }

    if let Some(utilization) = budget_utilization {
        if utilization > TIGHT_UTILIZATION {
            messages.push(format!(
                "Budget utilization is {:.1}%. Consider raising the budget to give the orders more room.",
                utilization * 100.0
            ));
        } else if utilization < SLACK_UTILIZATION {
            messages.push(format!(
                "Budget utilization is {:.1}%. The budget constraint is not binding.",
                utilization * 100.0
            ));
        }
    }

    if let Some(utilization) = capacity_utilization {
        if utilization > TIGHT_UTILIZATION {
            messages.push(format!(
                "Capacity utilization is {:.1}%. Warehouse space is nearly fully used.",
                utilization * 100.0
            ));
        } else if utilization < SLACK_UTILIZATION {
            messages.push(format!(
                "Capacity utilization is {:.1}%. The capacity constraint is not binding.",
                utilization * 100.0
            ));
        }
    }

    let top = top_cost_skus(&per_item, 3);
    if !top.is_empty() {
        messages.push(format!(
            "Top cost-contributing SKUs: {}. These drive most of the total cost.",
            top.join(", ")
        ));
    }

    let over_ordered = named_where(&per_item, |r| {
        r.order_quantity > r.mean_demand * OVER_ORDER_RATIO
    });
    if !over_ordered.is_empty() {
        messages.push(format!(
            "SKUs ordered well above mean demand: {}. Likely driven by high stockout penalties or volatile demand.",
            over_ordered.join(", ")
        ));
    }

    let under_ordered = named_where(&per_item, |r| {
        r.order_quantity < r.mean_demand * UNDER_ORDER_RATIO
    });
    if !under_ordered.is_empty() {
        messages.push(format!(
            "SKUs ordered below mean demand: {}. Likely limited by budget or capacity, or cheap to run short.",
            under_ordered.join(", ")
        ));
    }

    if total_holding > total_shortage * DOMINANCE_RATIO {
        messages.push(
            "Holding costs dominate shortage costs. Consider ordering less to cut overstock risk."
                .to_string(),
        );
    } else if total_shortage > total_holding * DOMINANCE_RATIO {
        messages.push(
            "Shortage costs dominate holding costs. Consider ordering more to cut stockout risk."
                .to_string(),
        );
    }

    RecommendationReport {
        metrics,
        per_item,
        messages,
    }
}

fn breakdown(result: &OptimizationResult) -> SkuCost {
    let item = &result.item;
    let order_quantity = result.order_quantity;

    let overstock = (order_quantity - item.mean_demand).max(0.0);
    let understock = (item.mean_demand - order_quantity).max(0.0);

    let purchasing_cost = item.unit_cost * order_quantity;
    let holding_cost = item.holding_cost * overstock;
    let shortage_cost = item.stockout_penalty * understock;

    SkuCost {
        sku: item.sku.clone(),
        mean_demand: item.mean_demand,
        order_quantity,
        purchasing_cost,
        holding_cost,
        shortage_cost,
        total_cost: purchasing_cost + holding_cost + shortage_cost,
    }
}

/// SKU names of the `count` largest total costs; stable sort keeps input
/// order on ties.
fn top_cost_skus(per_item: &[SkuCost], count: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..per_item.len()).collect();
    order.sort_by(|a, b| per_item[*b].total_cost.total_cmp(&per_item[*a].total_cost));
    order
        .into_iter()
        .take(count)
        .map(|i| per_item[i].sku.to_string())
        .collect()
}

fn named_where(per_item: &[SkuCost], predicate: impl Fn(&SkuCost) -> bool) -> Vec<String> {
    per_item
        .iter()
        .filter(|r| predicate(r))
        .map(|r| r.sku.to_string())
        .collect()
}
