use axum::Json;
use axum::extract::State;
use dashboard::{ChartDataset, ChartKind, layout_metrics};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::{AppPath, AppQuery};
use crate::models::dashboard::{ChartResponse, DashboardQuery, DashboardResponse};
use crate::models::{ApiResponse, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    operation_id = "getDashboard",
    summary = "All dashboard charts",
    description = "Fetches every CDR statistic from the reporting API and returns the chart \
        datasets with the layout metrics for the given viewport width. A chart whose data \
        could not be fetched is returned zeroed with `placeholder: true`.",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Chart datasets", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "Malformed query", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let charts = state.dashboard.all().await;
    Ok(Json(ApiResponse::ok(DashboardResponse {
        layout: layout_metrics(query.width()),
        charts,
    })))
}

#[utoipa::path(
    get,
    path = "/{chart}",
    tag = "Dashboard",
    operation_id = "getDashboardChart",
    summary = "One dashboard chart",
    params(
        ("chart" = String, Path, description = "One of: call-duration, disposition, monthly, destinations"),
        DashboardQuery,
    ),
    responses(
        (status = 200, description = "Chart dataset", body = ApiResponse<ChartResponse>),
        (status = 400, description = "Malformed query", body = ErrorBody),
        (status = 404, description = "Unknown chart", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_chart(
    State(state): State<AppState>,
    AppPath(chart): AppPath<String>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<ChartResponse>>, AppError> {
    let kind = ChartKind::from_slug(&chart)
        .ok_or_else(|| AppError::NotFound(format!("Unknown chart '{chart}'")))?;
    let chart: ChartDataset = state.dashboard.chart(kind).await;

    Ok(Json(ApiResponse::ok(ChartResponse {
        layout: layout_metrics(query.width()),
        chart,
    })))
}
