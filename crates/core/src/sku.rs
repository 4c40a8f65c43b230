use serde::{Deserialize, Serialize};

/// Stock-keeping-unit identifier.
///
/// Opaque and caller-provided; the pipeline never mints or interprets these,
/// it only groups and reports by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

impl SkuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SkuId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SkuId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SkuId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
