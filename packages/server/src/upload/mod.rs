//! Validation, staging and placement of multipart file uploads.
//!
//! Files are first streamed into temp files outside the upload root
//! ([`stage_field`]). Only once the whole request has been read without error
//! does an [`UploadBatch`] move them into the store under their field's
//! directory.

mod error;
mod field;
mod staging;

use chrono::Utc;
use common::storage::{BoxReader, UploadStore};
use tracing::info;

pub use error::UploadError;
pub use field::UploadField;
pub use staging::{FieldCounter, StagedUpload, stage_field, validate_upload};

use crate::utils::filename::{normalize_stored_path, stored_file_name};

/// A file written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub field: UploadField,
    /// Store-relative path, e.g. `gallery/a_b_com_galleryImages_x_1700000000000.png`.
    pub path: String,
}

/// Writes the staged files of one request.
///
/// Timestamps embedded in generated names are strictly increasing within the
/// batch, so two files with the same original name never collide.
pub struct UploadBatch<'a> {
    store: &'a dyn UploadStore,
    last_millis: i64,
}

impl<'a> UploadBatch<'a> {
    pub fn new(store: &'a dyn UploadStore) -> Self {
        Self {
            store,
            last_millis: 0,
        }
    }

    fn next_timestamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_millis = now.max(self.last_millis + 1);
        self.last_millis
    }

    /// Move one staged file into its field directory.
    pub async fn store(
        &mut self,
        staged: StagedUpload,
        email: &str,
    ) -> Result<StoredFile, UploadError> {
        let directory = staged.field.directory();
        self.store.ensure_dir(directory).await?;

        let millis = self.next_timestamp();
        let file_name = stored_file_name(email, &staged.field_name, &staged.original_name, millis);
        let relative = format!("{directory}/{file_name}");

        let file = tokio::fs::File::open(staged.temp_path())
            .await
            .map_err(common::storage::StorageError::from)?;
        let reader: BoxReader = Box::new(file);
        let written = self.store.put_stream(&relative, reader).await?;

        let path = normalize_stored_path(&written, self.store.root());
        info!(
            field = %staged.field_name,
            path = %path,
            size = staged.size,
            "Stored upload"
        );

        Ok(StoredFile {
            field: staged.field,
            path,
        })
    }

    /// Store every staged file in request order.
    pub async fn store_all(
        &mut self,
        staged: Vec<StagedUpload>,
        email: &str,
    ) -> Result<Vec<StoredFile>, UploadError> {
        let mut stored = Vec::with_capacity(staged.len());
        for upload in staged {
            stored.push(self.store(upload, email).await?);
        }
        Ok(stored)
    }
}
