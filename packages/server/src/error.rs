use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;

use crate::models::ErrorBody;
use crate::records::RecordError;
use crate::upload::UploadError;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request input.
    Validation(String),
    /// Rejected upload (extension, size or count). Reported as a server error
    /// with the rejection message.
    Upload(String),
    NotFound(String),
    /// Persistence or storage failure.
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upload(msg) => {
                tracing::warn!("Upload rejected: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => AppError::NotFound(format!("File '{path}' not found")),
            StorageError::InvalidPath(path) => {
                AppError::Validation(format!("Invalid file path '{path}'"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Storage(e) => AppError::Internal(e.to_string()),
            UploadError::Read { .. } => AppError::Validation(err.to_string()),
            other => AppError::Upload(other.to_string()),
        }
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound(_) => AppError::NotFound(err.to_string()),
            RecordError::Validation(msg) => AppError::Validation(msg),
            RecordError::Upload(e) => e.into(),
            RecordError::Database(e) => e.into(),
        }
    }
}
