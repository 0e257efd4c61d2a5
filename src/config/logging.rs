//! `[logging]` section
//!
//! The mock logs to stdout and the dashboard to stderr; both share these
//! settings. Component names are the crate's top-level modules (`mock`,
//! `monitor`, `dashboard`, `cli`) and become `xrde2e::<component>=<level>`
//! filter directives.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// How tracing events are written (`logging.format`, `XRDE2E_LOG_FORMAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, colored output for an operator's terminal
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging settings shared by the `mock` and `dashboard` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for the whole process; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
    /// Levels for single components, e.g. `{ monitor = "debug" }` to see
    /// every snapshot request while the mock stays at `info`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
    /// Add a truncated preview of each envelope to the mock's
    /// "Request received" line
    #[serde(default)]
    pub log_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
            log_bodies: false,
        }
    }
}
