use sea_orm::DbErr;
use thiserror::Error;

use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Student {0} not found")]
    NotFound(i32),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
