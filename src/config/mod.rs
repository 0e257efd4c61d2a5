//! Configuration module for xrde2e
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`XRDE2E_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use xrde2e::config::E2eConfig;
//!
//! let config = E2eConfig::default();
//! assert_eq!(config.server.port, 8081);
//!
//! let toml = r#"
//! [dashboard]
//! interval_seconds = 30
//! "#;
//! let config: E2eConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.dashboard.interval_seconds, 30);
//! ```

pub mod dashboard;
pub mod error;
pub mod logging;
pub mod server;

pub use dashboard::{DashboardConfig, ID_PLACEHOLDER};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for both the mock responder and the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct E2eConfig {
    /// Mock responder HTTP server
    pub server: ServerConfig,
    /// Dashboard poller and monitoring API endpoints
    pub dashboard: DashboardConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl E2eConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from `path` when the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("XRDE2E_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("XRDE2E_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("XRDE2E_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("XRDE2E_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(url) = std::env::var("XRDE2E_MONITOR_URL") {
            self.dashboard.base_url = url;
        }
        if let Ok(interval) = std::env::var("XRDE2E_POLL_INTERVAL") {
            if let Ok(i) = interval.parse() {
                self.dashboard.interval_seconds = i;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.dashboard.base_url.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "dashboard.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if self.dashboard.interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "dashboard.interval_seconds".to_string(),
                message: "interval must be at least one second".to_string(),
            });
        }
        if !self.dashboard.history_path.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Validation {
                field: "dashboard.history_path".to_string(),
                message: format!("path must contain the {} placeholder", ID_PLACEHOLDER),
            });
        }

        Ok(())
    }
}
