//! Client for the monitoring API's read endpoints.
//!
//! The dashboard only ever reads two things: the "current" snapshot and the
//! history of one security server. Both return a JSON array of
//! [`RequestRecord`]s.

mod error;
mod parser;

pub use error::FetchError;
pub use parser::parse_snapshot;

use crate::config::DashboardConfig;
use crate::events::RequestRecord;
use async_trait::async_trait;
use std::time::Duration;

/// Read access to the monitoring backend.
#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Fetch the current snapshot of request records.
    async fn fetch_current(&self) -> Result<Vec<RequestRecord>, FetchError>;

    /// Fetch the history snapshot of one security server.
    async fn fetch_history(&self, server: &str) -> Result<Vec<RequestRecord>, FetchError>;
}

/// [`MonitorApi`] over HTTP.
pub struct HttpMonitorClient {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl HttpMonitorClient {
    /// Create a client with a pooled HTTP client honoring the configured timeout.
    pub fn new(config: DashboardConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FetchError::from_reqwest(e, config.timeout_seconds))?;

        Ok(Self { client, config })
    }

    /// Create a client with a custom HTTP client (for testing).
    pub fn with_client(config: DashboardConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    async fn get_snapshot(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<RequestRecord>, FetchError> {
        tracing::debug!(url = %url, "Fetching snapshot");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.config.timeout_seconds))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.config.timeout_seconds))?;

        if !status.is_success() {
            return Err(FetchError::Transport {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                body: Some(body),
            });
        }

        parse_snapshot(&body)
    }
}

#[async_trait]
impl MonitorApi for HttpMonitorClient {
    async fn fetch_current(&self) -> Result<Vec<RequestRecord>, FetchError> {
        self.get_snapshot(&self.config.current_url(), &[]).await
    }

    async fn fetch_history(&self, server: &str) -> Result<Vec<RequestRecord>, FetchError> {
        let mut query = Vec::new();
        if self.config.history_limit > 0 {
            query.push(("limit", self.config.history_limit.to_string()));
        }
        self.get_snapshot(&self.config.history_url(server), &query)
            .await
    }
}
