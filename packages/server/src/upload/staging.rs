use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use super::error::UploadError;
use super::field::UploadField;
use crate::utils::filename::split_file_name;

/// An uploaded file held in a temp file until the request has been fully read.
///
/// The temp file is removed when the value is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    pub field: UploadField,
    /// Field name as declared in the request.
    pub field_name: String,
    pub original_name: String,
    pub size: u64,
    temp_path: PathBuf,
}

impl StagedUpload {
    /// Wrap an already written temp file.
    pub fn from_temp_file(
        field_name: &str,
        original_name: &str,
        size: u64,
        temp_path: PathBuf,
    ) -> Self {
        Self {
            field: UploadField::from_name(field_name),
            field_name: field_name.to_string(),
            original_name: original_name.to_string(),
            size,
            temp_path,
        }
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub fn extension(&self) -> &str {
        split_file_name(&self.original_name).1
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.temp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => debug!(
                path = %self.temp_path.display(),
                error = %e,
                "Failed to remove staged upload"
            ),
        }
    }
}

/// Counts files per field within one request.
#[derive(Debug, Default)]
pub struct FieldCounter(HashMap<UploadField, usize>);

impl FieldCounter {
    fn admit(&mut self, field: UploadField, field_name: &str) -> Result<(), UploadError> {
        let count = self.0.entry(field).or_default();
        *count += 1;
        match field.max_files() {
            Some(max) if *count > max => Err(UploadError::TooManyFiles {
                field: field_name.to_string(),
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// Check that `file_name` may be stored under `field`.
pub fn validate_upload(
    field: UploadField,
    field_name: &str,
    file_name: &str,
) -> Result<(), UploadError> {
    if file_name.trim().is_empty() {
        return Err(UploadError::MissingFilename {
            field: field_name.to_string(),
        });
    }

    let (_, extension) = split_file_name(file_name);
    if !field.allows(extension) {
        return Err(UploadError::InvalidExtension {
            field: field_name.to_string(),
            extension: extension.to_string(),
            allowed: field.allowed_extensions().join(", "),
        });
    }
    Ok(())
}

/// Validate a multipart file field and stream it to a temp file.
///
/// The extension and per-field count are checked before any byte is read; the
/// size limit is enforced while streaming.
pub async fn stage_field(
    mut field: Field<'_>,
    field_name: &str,
    counter: &mut FieldCounter,
    max_size: u64,
) -> Result<StagedUpload, UploadError> {
    let upload_field = UploadField::from_name(field_name);
    counter.admit(upload_field, field_name)?;

    let original_name = field.file_name().unwrap_or_default().to_string();
    validate_upload(upload_field, field_name, &original_name)?;

    let mut staged = StagedUpload {
        field: upload_field,
        field_name: field_name.to_string(),
        original_name,
        size: 0,
        temp_path: std::env::temp_dir().join(format!("records-upload-{}", Uuid::new_v4())),
    };

    let read_error = |e: &dyn std::fmt::Display| UploadError::Read {
        field: field_name.to_string(),
        message: e.to_string(),
    };

    let mut temp_file = tokio::fs::File::create(&staged.temp_path)
        .await
        .map_err(|e| read_error(&e))?;

    while let Some(chunk) = field.chunk().await.map_err(|e| read_error(&e))? {
        staged.size += chunk.len() as u64;
        if staged.size > max_size {
            return Err(UploadError::FileTooLarge {
                field: field_name.to_string(),
                limit: max_size,
            });
        }
        temp_file
            .write_all(&chunk)
            .await
            .map_err(|e| read_error(&e))?;
    }

    temp_file.flush().await.map_err(|e| read_error(&e))?;

    Ok(staged)
}
