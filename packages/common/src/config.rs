use std::path::PathBuf;

use serde::Deserialize;

/// Upload storage configuration shared by the server and its tests.
#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Root directory of the upload store. Stored paths are relative to it.
    /// Default: "./uploads".
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// Maximum size of a single uploaded file in bytes. Default: 50 MiB.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Maximum size of a whole multipart request body in bytes. Default: 3000 MiB.
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}
fn default_max_request_size() -> usize {
    3000 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            max_file_size: default_max_file_size(),
            max_request_size: default_max_request_size(),
        }
    }
}
