use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::DashboardError;
use crate::models::{DestinationTotal, DispositionTotals, DurationBuckets, MonthlyPoint};

pub const CALL_DURATION_PATH: &str = "/stats/call-duration";
pub const DISPOSITION_PATH: &str = "/stats/disposition";
pub const MONTHLY_PATH: &str = "/stats/monthly";
pub const DESTINATIONS_PATH: &str = "/stats/destinations";

/// Read-only client for the remote CDR reporting API.
#[derive(Clone)]
pub struct CdrClient {
    http: reqwest::Client,
    base_url: String,
}

impl CdrClient {
    /// Build a client for `base_url`. Requests never time out unless `timeout` is set.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DashboardError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn call_duration(&self) -> Result<DurationBuckets, DashboardError> {
        self.fetch_json(CALL_DURATION_PATH).await
    }

    pub async fn disposition(&self) -> Result<DispositionTotals, DashboardError> {
        self.fetch_json(DISPOSITION_PATH).await
    }

    pub async fn monthly(&self) -> Result<Vec<MonthlyPoint>, DashboardError> {
        self.fetch_json(MONTHLY_PATH).await
    }

    pub async fn destinations(&self) -> Result<Vec<DestinationTotal>, DashboardError> {
        self.fetch_json(DESTINATIONS_PATH).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Fetched statistics");
        Ok(serde_json::from_slice(&bytes)?)
    }
}
