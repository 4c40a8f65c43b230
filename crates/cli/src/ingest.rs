//! CSV ingestion: sales history and per-SKU cost overrides.
//!
//! This is the caller side of the core boundary: required columns are a
//! user-facing error here, and rows with negative quantities are dropped
//! here. Unparseable dates/quantities are passed through raw — deciding
//! about those is the aggregation stage's job.

use std::io::Read;

use anyhow::Context;
use tracing::debug;

use restock_core::SkuId;
use restock_demand::{CostOverride, CostOverrides, Transaction};

/// Read sales transactions from a CSV with required columns `date`, `sku`
/// and `quantity` (any column order; extra columns are ignored).
pub fn read_sales(input: impl Read) -> anyhow::Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV header")?.clone();

    let date_col = required_column(&headers, "date")?;
    let sku_col = required_column(&headers, "sku")?;
    let quantity_col = required_column(&headers, "quantity")?;

    let mut transactions = Vec::new();
    for record in reader.records() {
        let record = record.context("reading CSV row")?;
        let date = record.get(date_col).unwrap_or("").to_string();
        let sku = record.get(sku_col).unwrap_or("").to_string();
        let quantity = record.get(quantity_col).unwrap_or("").to_string();

        if let Ok(parsed) = quantity.trim().parse::<f64>() {
            if parsed < 0.0 {
                debug!(sku = %sku, quantity = %quantity, "dropping row with negative quantity");
                continue;
            }
        }

        transactions.push(Transaction {
            date,
            sku,
            quantity,
        });
    }
    Ok(transactions)
}

/// Read the optional per-SKU cost table. Only `sku` is required; the four
/// cost columns are optional, and blank or unparseable cells stay unset so
/// the forecaster fills them from defaults.
pub fn read_cost_overrides(input: impl Read) -> anyhow::Result<CostOverrides> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV header")?.clone();

    let sku_col = required_column(&headers, "sku")?;
    let unit_col = find_column(&headers, "unit_cost");
    let holding_col = find_column(&headers, "holding_cost");
    let penalty_col = find_column(&headers, "stockout_penalty");
    let volume_col = find_column(&headers, "volume");

    let mut overrides = CostOverrides::new();
    for record in reader.records() {
        let record = record.context("reading CSV row")?;
        let sku = record.get(sku_col).unwrap_or("").trim().to_string();
        if sku.is_empty() {
            continue;
        }

        let cell = |column: Option<usize>| -> Option<f64> {
            let raw = column.and_then(|c| record.get(c))?.trim();
            if raw.is_empty() {
                return None;
            }
            raw.parse().ok()
        };

        overrides.insert(
            SkuId::new(sku),
            CostOverride {
                unit_cost: cell(unit_col),
                holding_cost: cell(holding_col),
                stockout_penalty: cell(penalty_col),
                volume: cell(volume_col),
            },
        );
    }
    Ok(overrides)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn required_column(headers: &csv::StringRecord, name: &str) -> anyhow::Result<usize> {
    find_column(headers, name).with_context(|| {
        format!(
            "missing required column: {name} (found: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_columns_may_come_in_any_order() {
        let csv = "sku,quantity,date\nA,3,2024-01-01\n";
        let transactions = read_sales(csv.as_bytes()).unwrap();
        assert_eq!(
            transactions,
            vec![Transaction::new("2024-01-01", "A", "3")]
        );
    }

    #[test]
    fn missing_sales_column_is_a_user_error() {
        let csv = "date,item,quantity\n2024-01-01,A,3\n";
        let err = read_sales(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing required column: sku"));
    }

    #[test]
    fn negative_quantities_are_dropped_before_the_core_boundary() {
        let csv = "date,sku,quantity\n2024-01-01,A,3\n2024-01-02,A,-2\n2024-01-03,A,oops\n";
        let transactions = read_sales(csv.as_bytes()).unwrap();
        // The negative row goes; the unparseable one is the aggregator's call.
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].quantity, "oops");
    }

    #[test]
    fn cost_override_blank_cells_stay_unset() {
        let csv = "sku,unit_cost,holding_cost,stockout_penalty,volume\nA,12.5,,8,\n";
        let overrides = read_cost_overrides(csv.as_bytes()).unwrap();
        let defaults = restock_core::CostDefaults::default();
        let resolved = overrides.resolve(&SkuId::new("A"), &defaults);
        assert_eq!(resolved.unit_cost, 12.5);
        assert_eq!(resolved.stockout_penalty, 8.0);
        assert_eq!(resolved.holding_cost, defaults.holding_cost);
        assert_eq!(resolved.volume, defaults.volume);
    }

    #[test]
    fn cost_table_only_needs_the_sku_column() {
        let csv = "sku,unit_cost\nA,4\n";
        let overrides = read_cost_overrides(csv.as_bytes()).unwrap();
        assert_eq!(overrides.len(), 1);
    }
}
