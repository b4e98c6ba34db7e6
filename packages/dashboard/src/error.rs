use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote endpoint {path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("Failed to decode statistics: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Statistics total exceeds the supported range")]
    Overflow,
}
