use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

use crate::client::CdrClient;
use crate::error::DashboardError;
use crate::format::{format_compact, percentage, round_one_decimal};
use crate::models::{DestinationTotal, DispositionTotals, DurationBuckets, MonthlyPoint};

/// Number of points kept from the monthly series.
const ROLLING_MONTHS: usize = 12;

const DURATION_LABELS: [&str; 5] = ["< 30s", "30s - 1m", "1m - 3m", "3m - 5m", "> 5m"];
const DISPOSITION_LABELS: [&str; 4] = ["Answered", "No Answer", "Busy", "Failed"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    CallDuration,
    Disposition,
    Monthly,
    Destinations,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CallDuration,
        ChartKind::Disposition,
        ChartKind::Monthly,
        ChartKind::Destinations,
    ];

    /// URL segment identifying the chart.
    pub fn slug(self) -> &'static str {
        match self {
            Self::CallDuration => "call-duration",
            Self::Disposition => "disposition",
            Self::Monthly => "monthly",
            Self::Destinations => "destinations",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CallDuration => "Call Duration Distribution",
            Self::Disposition => "Call Disposition",
            Self::Monthly => "Monthly Call Volume",
            Self::Destinations => "Top Destinations",
        }
    }
}

/// One labelled value of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub label: String,
    pub value: u64,
    /// Minutes for series that carry both calls and minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<u64>,
    /// Share of the chart total, one decimal place.
    pub percentage: f64,
    /// `value` in compact form, e.g. `1.2K`.
    pub formatted: String,
}

/// Derived statistics over a chart's values.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub total: u64,
    pub average: f64,
    pub min: u64,
    pub max: u64,
    pub formatted_total: String,
}

impl SeriesSummary {
    /// Fails with [`DashboardError::Overflow`] when the values do not sum in a `u64`.
    pub fn from_values(values: &[u64]) -> Result<Self, DashboardError> {
        let total = values
            .iter()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            .ok_or(DashboardError::Overflow)?;
        let average = if values.is_empty() {
            0.0
        } else {
            round_one_decimal(total as f64 / values.len() as f64)
        };
        Ok(Self {
            total,
            average,
            min: values.iter().copied().min().unwrap_or(0),
            max: values.iter().copied().max().unwrap_or(0),
            formatted_total: format_compact(total),
        })
    }

    fn zero() -> Self {
        Self {
            total: 0,
            average: 0.0,
            min: 0,
            max: 0,
            formatted_total: format_compact(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub kind: ChartKind,
    pub title: String,
    pub categories: Vec<Category>,
    pub summary: SeriesSummary,
    /// Set when the remote fetch failed and the zeroed fallback is shown.
    pub placeholder: bool,
}

impl ChartDataset {
    fn from_rows(
        kind: ChartKind,
        rows: Vec<(String, u64, Option<u64>)>,
    ) -> Result<Self, DashboardError> {
        let values: Vec<u64> = rows.iter().map(|(_, v, _)| *v).collect();
        let summary = SeriesSummary::from_values(&values)?;
        Ok(Self::assemble(kind, rows, summary))
    }

    fn assemble(
        kind: ChartKind,
        rows: Vec<(String, u64, Option<u64>)>,
        summary: SeriesSummary,
    ) -> Self {
        let categories = rows
            .into_iter()
            .map(|(label, value, secondary_value)| Category {
                label,
                value,
                secondary_value,
                percentage: percentage(value, summary.total),
                formatted: format_compact(value),
            })
            .collect();

        Self {
            kind,
            title: kind.title().to_string(),
            categories,
            summary,
            placeholder: false,
        }
    }

    pub fn call_duration(buckets: &DurationBuckets) -> Result<Self, DashboardError> {
        let values = [
            buckets.under_30s,
            buckets.from_30s_to_1m,
            buckets.from_1m_to_3m,
            buckets.from_3m_to_5m,
            buckets.over_5m,
        ];
        Self::from_rows(ChartKind::CallDuration, labelled(&DURATION_LABELS, &values))
    }

    pub fn disposition(totals: &DispositionTotals) -> Result<Self, DashboardError> {
        let values = [
            totals.answered,
            totals.no_answer,
            totals.busy,
            totals.failed,
        ];
        Self::from_rows(ChartKind::Disposition, labelled(&DISPOSITION_LABELS, &values))
    }

    /// Keeps the most recent twelve points, in the order the API sent them.
    pub fn monthly(points: &[MonthlyPoint]) -> Result<Self, DashboardError> {
        let start = points.len().saturating_sub(ROLLING_MONTHS);
        let rows = points[start..]
            .iter()
            .map(|p| (p.month.clone(), p.calls, Some(p.minutes)))
            .collect();
        Self::from_rows(ChartKind::Monthly, rows)
    }

    /// Sorted by call count, descending, truncated to `top`.
    pub fn destinations(totals: &[DestinationTotal], top: usize) -> Result<Self, DashboardError> {
        let mut sorted: Vec<&DestinationTotal> = totals.iter().collect();
        sorted.sort_by(|a, b| b.calls.cmp(&a.calls).then_with(|| a.destination.cmp(&b.destination)));
        let rows = sorted
            .into_iter()
            .take(top)
            .map(|d| (d.destination.clone(), d.calls, Some(d.minutes)))
            .collect();
        Self::from_rows(ChartKind::Destinations, rows)
    }

    /// Zeroed dataset shown when the remote statistics are unavailable.
    pub fn placeholder(kind: ChartKind) -> Self {
        let rows = match kind {
            ChartKind::CallDuration => labelled(&DURATION_LABELS, &[0; DURATION_LABELS.len()]),
            ChartKind::Disposition => {
                labelled(&DISPOSITION_LABELS, &[0; DISPOSITION_LABELS.len()])
            }
            ChartKind::Monthly => MONTH_LABELS
                .iter()
                .map(|m| ((*m).to_string(), 0, Some(0)))
                .collect(),
            ChartKind::Destinations => Vec::new(),
        };
        let mut dataset = Self::assemble(kind, rows, SeriesSummary::zero());
        dataset.placeholder = true;
        dataset
    }
}

fn labelled(labels: &[&str], values: &[u64]) -> Vec<(String, u64, Option<u64>)> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| ((*label).to_string(), *value, None))
        .collect()
}

/// Loads chart datasets from the remote API, falling back to placeholders.
#[derive(Clone)]
pub struct Dashboard {
    client: CdrClient,
    top_destinations: usize,
}

impl Dashboard {
    pub fn new(client: CdrClient, top_destinations: usize) -> Self {
        Self {
            client,
            top_destinations,
        }
    }

    /// Fetch and shape one chart. A failed fetch is logged and replaced by the
    /// chart's zeroed placeholder.
    pub async fn chart(&self, kind: ChartKind) -> ChartDataset {
        match self.fetch_chart(kind).await {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(chart = kind.slug(), error = %e, "Failed to fetch chart statistics");
                ChartDataset::placeholder(kind)
            }
        }
    }

    /// Fetch every chart concurrently, in [`ChartKind::ALL`] order.
    pub async fn all(&self) -> Vec<ChartDataset> {
        join_all(ChartKind::ALL.into_iter().map(|kind| self.chart(kind))).await
    }

    async fn fetch_chart(&self, kind: ChartKind) -> Result<ChartDataset, DashboardError> {
        match kind {
            ChartKind::CallDuration => ChartDataset::call_duration(&self.client.call_duration().await?),
            ChartKind::Disposition => ChartDataset::disposition(&self.client.disposition().await?),
            ChartKind::Monthly => ChartDataset::monthly(&self.client.monthly().await?),
            ChartKind::Destinations => {
                ChartDataset::destinations(&self.client.destinations().await?, self.top_destinations)
            }
        }
    }
}
