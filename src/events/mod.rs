//! Request records reported by the E2E monitoring backend.
//!
//! A record describes one request sent to a security server: when it was
//! sent and answered, how long it took, and whether it succeeded.

mod timestamp;

pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};

use serde::{Deserialize, Deserializer, Serialize};

/// One observed interaction with a security server.
///
/// Field names follow the backend's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Security server identifier (absent in history rows)
    #[serde(default, deserialize_with = "null_as_default")]
    pub security_server: String,
    /// Human label, displayed instead of the identifier when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Producer member the request was addressed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_member: Option<String>,
    /// Send time
    #[serde(default)]
    pub begin: Option<Timestamp>,
    /// Receive time, absent while the request is in flight
    #[serde(default)]
    pub end: Option<Timestamp>,
    /// Milliseconds between send and receive
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_id: String,
    /// True if and only if the request succeeded
    pub status: bool,
    #[serde(default)]
    pub fault_code: Option<String>,
    #[serde(default)]
    pub fault_string: Option<String>,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
}

impl RequestRecord {
    /// Name shown in the server column: the label, or the identifier when
    /// the label is empty.
    pub fn display_server(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.security_server,
        }
    }

    /// True while no response has been received.
    pub fn is_in_flight(&self) -> bool {
        self.end.is_none()
    }

    /// Check that duration is non-negative when both timestamps are present.
    pub fn check_duration(&self) -> Result<(), String> {
        if self.begin.is_some() && self.end.is_some() && self.duration < 0 {
            return Err(format!(
                "request {} has negative duration {} ms",
                self.request_id, self.duration
            ));
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
