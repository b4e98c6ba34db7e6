use common::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file type for {field}: '{extension}' is not allowed (allowed: {allowed})")]
    InvalidExtension {
        field: String,
        extension: String,
        allowed: String,
    },

    #[error("File for {field} exceeds the maximum size of {limit} bytes")]
    FileTooLarge { field: String, limit: u64 },

    #[error("Too many files for {field}: at most {max} allowed")]
    TooManyFiles { field: String, max: usize },

    #[error("File for {field} must have a filename")]
    MissingFilename { field: String },

    #[error("Failed to read upload for {field}: {message}")]
    Read { field: String, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
