//! Response shapes of the remote CDR reporting API.

use serde::Deserialize;

/// Call counts grouped by call duration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DurationBuckets {
    #[serde(rename = "under30s")]
    pub under_30s: u64,
    #[serde(rename = "from30sTo1m")]
    pub from_30s_to_1m: u64,
    #[serde(rename = "from1mTo3m")]
    pub from_1m_to_3m: u64,
    #[serde(rename = "from3mTo5m")]
    pub from_3m_to_5m: u64,
    #[serde(rename = "over5m")]
    pub over_5m: u64,
}

/// Call totals grouped by disposition.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DispositionTotals {
    pub answered: u64,
    pub no_answer: u64,
    pub busy: u64,
    pub failed: u64,
}

/// One month of the rolling twelve-month series.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MonthlyPoint {
    /// Month label as sent by the API, e.g. `2024-03` or `Mar`.
    pub month: String,
    #[serde(default)]
    pub calls: u64,
    #[serde(default)]
    pub minutes: u64,
}

/// Totals for a single destination.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DestinationTotal {
    pub destination: String,
    #[serde(default)]
    pub calls: u64,
    #[serde(default)]
    pub minutes: u64,
}
