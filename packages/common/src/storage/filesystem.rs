use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use super::error::StorageError;
use super::traits::{BoxReader, UploadStore};

/// Directory under the root holding partially written files.
const TMP_DIR: &str = ".tmp";

/// Filesystem-backed upload store.
///
/// Files live at `{root}/{relative path}`. Writes go to `{root}/.tmp` first and are
/// renamed into place, so a reader never observes a half-written file.
pub struct FilesystemUploadStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemUploadStore {
    /// Create a new filesystem upload store rooted at `root`.
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(TMP_DIR)).await?;
        let root = fs::canonicalize(&root).await?;
        Ok(Self { root, max_size })
    }

    /// Resolve a stored path to its absolute location, rejecting anything that
    /// could leave the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        if path.is_empty() || path.contains('\\') || path.contains('\0') {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        if relative
            .components()
            .next()
            .is_some_and(|c| c.as_os_str() == TMP_DIR)
        {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root
            .join(TMP_DIR)
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl UploadStore for FilesystemUploadStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_dir(&self, dir: &str) -> Result<(), StorageError> {
        let target = self.resolve(dir)?;
        if !fs::try_exists(&target).await? {
            debug!(dir, "Creating upload directory");
            fs::create_dir_all(&target).await?;
        }
        Ok(())
    }

    async fn put_stream(&self, path: &str, mut reader: BoxReader) -> Result<PathBuf, StorageError> {
        let target = self.resolve(path)?;
        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(&temp_path).await?;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        drop(temp_file);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(target)
    }

    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let target = self.resolve(path)?;
        match fs::File::open(&target).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.resolve(path)?;
        Ok(fs::try_exists(&target).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let target = self.resolve(path)?;
        match fs::metadata(&target).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(StorageError::NotFound(path.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
