use dashboard::{ChartDataset, LayoutMetrics};
use serde::{Deserialize, Serialize};

/// Viewport width assumed when the client does not send one.
pub const DEFAULT_WIDTH: u32 = 1024;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Viewport width in pixels used to pick layout metrics. Defaults to 1024.
    pub width: Option<u32>,
}

impl DashboardQuery {
    pub fn width(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ChartResponse {
    pub layout: LayoutMetrics,
    pub chart: ChartDataset,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DashboardResponse {
    pub layout: LayoutMetrics,
    /// Call duration, disposition, monthly volume and destinations, in that order.
    pub charts: Vec<ChartDataset>,
}
