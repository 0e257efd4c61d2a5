//! Error types for monitoring API reads.

use thiserror::Error;

/// Errors that can occur while reading a snapshot.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The endpoint could not be reached or answered with a non-success status
    #[error("transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
        /// Raw response body, when one was received
        body: Option<String>,
    },

    /// The payload was not a JSON array of request records
    #[error("malformed response: {0}")]
    Malformed(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl FetchError {
    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { status, .. } => *status,
            FetchError::Malformed(_) => None,
        }
    }

    /// Raw payload attached to the error, if any.
    pub fn payload(&self) -> Option<&str> {
        match self {
            FetchError::Transport { body, .. } => body.as_deref(),
            FetchError::Malformed(_) => None,
        }
    }

    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        let message = if e.is_timeout() {
            format!("request timeout after {}s", timeout_seconds)
        } else {
            e.to_string()
        };
        FetchError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message,
            body: None,
        }
    }
}
