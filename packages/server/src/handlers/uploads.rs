use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::AppPath;
use crate::models::ErrorBody;
use crate::state::AppState;
use crate::utils::filename::validate_stored_path;

#[utoipa::path(
    get,
    path = "/uploads/{path}",
    tag = "Uploads",
    operation_id = "getUpload",
    summary = "Download a stored file",
    description = "Streams a file from the upload store. `path` is the store-relative path held \
        by a student record, e.g. `gallery/a_b_com_galleryImages_x_1700000000000.png`.",
    params(("path" = String, Path, description = "Store-relative file path")),
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "Invalid path", body = ErrorBody),
        (status = 404, description = "File not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_upload(
    State(state): State<AppState>,
    AppPath(path): AppPath<String>,
) -> Result<Response, AppError> {
    let path = validate_stored_path(&path).map_err(|e| AppError::Validation(e.into()))?;

    let size = state.store.size(&path).await?;
    let reader = state.store.get_stream(&path).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
