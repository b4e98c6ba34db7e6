use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Path-addressed file storage for uploaded attachments.
///
/// Every path accepted by this trait is relative to the store root and uses `/`
/// separators, e.g. `gallery/a_galleryImages_b_1700000000000.png`.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Absolute root directory of the store.
    fn root(&self) -> &Path;

    /// Create a sub-directory under the root if it does not exist yet.
    async fn ensure_dir(&self, dir: &str) -> Result<(), StorageError>;

    /// Store bytes at `path`, returning the absolute location written.
    async fn put(&self, path: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(path, reader).await
    }

    /// Store data from an async reader at `path`, returning the absolute location written.
    async fn put_stream(&self, path: &str, reader: BoxReader) -> Result<PathBuf, StorageError>;

    /// Retrieve all bytes of a stored file.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve a stored file as a streaming async reader.
    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError>;

    /// Check whether a file exists.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Get the size of a stored file in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;
}
