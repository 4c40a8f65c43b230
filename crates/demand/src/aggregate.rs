//! Demand aggregation: raw transactions to per-SKU period series.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use restock_core::SkuId;

use crate::series::{DemandPoint, DemandSeries};
use crate::transaction::Transaction;

/// Resampling granularity for demand aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Daily,
    Weekly,
    Monthly,
}

impl Bucket {
    /// The canonical start of the bucket containing `date`:
    /// the date itself, the Monday of its ISO week, or the first of its month.
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Daily => date,
            Bucket::Weekly => date - Days::new(u64::from(date.weekday().num_days_from_monday())),
            Bucket::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// The start of the bucket immediately following the one starting at `start`.
    pub fn advance(self, start: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Daily => start + Days::new(1),
            Bucket::Weekly => start + Days::new(7),
            Bucket::Monthly => start + Months::new(1),
        }
    }
}

impl core::fmt::Display for Bucket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Bucket::Daily => "daily",
            Bucket::Weekly => "weekly",
            Bucket::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl core::str::FromStr for Bucket {
    type Err = restock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Bucket::Daily),
            "weekly" | "week" | "w" => Ok(Bucket::Weekly),
            "monthly" | "month" | "m" => Ok(Bucket::Monthly),
            other => Err(restock_core::DomainError::invalid_config(format!(
                "unknown bucket width: {other}"
            ))),
        }
    }
}

/// Group raw transactions by SKU and resample them into contiguous buckets.
///
/// Rows with unparseable dates or non-numeric quantities are dropped (logged
/// at debug level), never fatal. Periods with no transactions inside a SKU's
/// observed span appear with quantity 0, so a trailing forecast window has a
/// stable length even for sparse history. The returned series are sorted by
/// SKU; points are chronological.
pub fn aggregate(transactions: &[Transaction], bucket: Bucket) -> Vec<DemandSeries> {
    let mut by_sku: BTreeMap<SkuId, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for tx in transactions {
        let Some(date) = parse_date(&tx.date) else {
            debug!(date = %tx.date, sku = %tx.sku, "dropping row with unparseable date");
            continue;
        };
        let quantity = match tx.quantity.trim().parse::<f64>() {
            Ok(q) if q.is_finite() => q,
            _ => {
                debug!(quantity = %tx.quantity, sku = %tx.sku, "dropping row with non-numeric quantity");
                continue;
            }
        };

        let period = bucket.start_of(date);
        *by_sku
            .entry(SkuId::new(tx.sku.clone()))
            .or_default()
            .entry(period)
            .or_insert(0.0) += quantity;
    }

    by_sku
        .into_iter()
        .map(|(sku, periods)| DemandSeries {
            sku,
            points: fill_span(&periods, bucket),
        })
        .collect()
}

/// Expand sparse per-period sums into a contiguous run of points over the
/// SKU's observed span.
fn fill_span(periods: &BTreeMap<NaiveDate, f64>, bucket: Bucket) -> Vec<DemandPoint> {
    let (Some(first), Some(last)) = (
        periods.keys().next().copied(),
        periods.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        points.push(DemandPoint {
            period_start: cursor,
            quantity: periods.get(&cursor).copied().unwrap_or(0.0),
        });
        cursor = bucket.advance(cursor);
    }
    points
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    None
}
