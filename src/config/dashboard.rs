//! Dashboard poller configuration

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the security server identifier in `history_path`.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Configuration for the dashboard poller and its read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the monitoring API
    pub base_url: String,
    /// Path of the "current snapshot" endpoint
    pub current_path: String,
    /// Path template of the per-server history endpoint, must contain `{id}`
    pub history_path: String,
    /// Seconds to wait after a poll completes before starting the next one
    pub interval_seconds: u64,
    /// Timeout for each read request
    pub timeout_seconds: u64,
    /// Maximum number of history rows requested (0 = backend default)
    pub history_limit: u32,
    /// Port for the dashboard's own `/metrics` endpoint (0 = disabled)
    pub metrics_port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            current_path: "/api/v1/current".to_string(),
            history_path: format!("/api/v1/history/{}", ID_PLACEHOLDER),
            interval_seconds: 5,
            timeout_seconds: 10,
            history_limit: 0,
            metrics_port: 0,
        }
    }
}

impl DashboardConfig {
    /// Full URL of the current snapshot endpoint.
    pub fn current_url(&self) -> String {
        join_url(&self.base_url, &self.current_path)
    }

    /// Full URL of the history endpoint for one security server.
    ///
    /// The identifier is inserted verbatim: server identifiers contain `/`
    /// and the backend matches the remainder of the path.
    pub fn history_url(&self, server: &str) -> String {
        let path = self.history_path.replace(ID_PLACEHOLDER, server);
        join_url(&self.base_url, &path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.interval_seconds, 5);
        assert_eq!(config.current_path, "/api/v1/current");
        assert_eq!(config.history_path, "/api/v1/history/{id}");
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.metrics_port, 0);
    }

    #[test]
    fn test_current_url_joins_slashes() {
        let config = DashboardConfig {
            base_url: "http://monitor:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.current_url(), "http://monitor:8080/api/v1/current");
    }

    #[test]
    fn test_history_url_keeps_identifier_verbatim() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.history_url("FI/GOV/1234/ss1"),
            "http://localhost:8080/api/v1/history/FI/GOV/1234/ss1"
        );
    }

    #[test]
    fn test_legacy_ajax_layout() {
        let config = DashboardConfig {
            current_path: "/ajax/current".to_string(),
            history_path: "/ajax/historical/{id}".to_string(),
            ..Default::default()
        };
        assert_eq!(config.current_url(), "http://localhost:8080/ajax/current");
        assert_eq!(
            config.history_url("SS1"),
            "http://localhost:8080/ajax/historical/SS1"
        );
    }
}
