//! Timestamps as the monitoring backend serializes them.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for epoch timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// A point in time reported by the backend.
///
/// The backend's default date serialization is epoch milliseconds, but
/// preformatted strings are also seen and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Preformatted text
    Text(String),
}

impl Timestamp {
    /// Render in the given time zone. Text values pass through unchanged.
    pub fn format_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            Timestamp::Millis(ms) => match DateTime::<Utc>::from_timestamp_millis(*ms) {
                Some(utc) => utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
                None => ms.to_string(),
            },
            Timestamp::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(&Local))
    }
}
