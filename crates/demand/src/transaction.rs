use serde::{Deserialize, Serialize};

/// One raw sales transaction as received from the ingestion boundary.
///
/// `date` and `quantity` are kept as raw strings: parsing and validating them
/// is the aggregation stage's concern, and rows that fail to parse are dropped
/// there rather than failing the caller. Negative quantities are invalid and
/// are expected to be filtered out by the caller before this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub sku: String,
    pub quantity: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        sku: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            sku: sku.into(),
            quantity: quantity.into(),
        }
    }
}
