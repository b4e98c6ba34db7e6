//! Call-detail-record statistics for the dashboard charts.
//!
//! The remote reporting API returns pre-aggregated numbers; this crate reshapes
//! them into chart datasets, derives display values and computes the layout
//! metrics the charts use at a given viewport width.

pub mod charts;
pub mod client;
pub mod error;
pub mod format;
pub mod layout;
pub mod models;

pub use charts::{Category, ChartDataset, ChartKind, Dashboard, SeriesSummary};
pub use client::CdrClient;
pub use error::DashboardError;
pub use format::{format_compact, percentage};
pub use layout::{Breakpoint, LayoutMetrics, layout_metrics};
