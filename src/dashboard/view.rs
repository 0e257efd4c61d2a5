//! Pure mapping from request records to table rows.
//!
//! Rows keep the order of the records and there is exactly one row per
//! record; formatting for the terminal happens in `cli::output`.

use crate::events::{RequestRecord, Timestamp};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;

/// Placeholder for values the backend did not report.
pub const PLACEHOLDER: &str = "-";

/// Two-valued status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBadge {
    Ok,
    Nok,
}

impl StatusBadge {
    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::Ok => "OK",
            StatusBadge::Nok => "NOK",
        }
    }
}

impl From<bool> for StatusBadge {
    fn from(status: bool) -> Self {
        if status {
            StatusBadge::Ok
        } else {
            StatusBadge::Nok
        }
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the history view (no server column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Duration with unit, e.g. `120 ms`
    pub duration: String,
    /// Send time
    pub sent: String,
    /// Receive time, [`PLACEHOLDER`] while in flight
    pub received: String,
    pub created: String,
    pub request_id: String,
    pub status: StatusBadge,
    /// Fault code and fault string, empty on success
    pub info: String,
}

/// One row of the current-status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentRow {
    /// Label, or the server identifier when there is no label
    pub server: String,
    /// Server identifier, used for drill-down
    pub server_id: String,
    #[serde(flatten)]
    pub detail: HistoryRow,
}

/// Map the current snapshot to rows.
pub fn render_current(records: &[RequestRecord]) -> Vec<CurrentRow> {
    records
        .iter()
        .map(|r| CurrentRow {
            server: r.display_server().to_string(),
            server_id: r.security_server.clone(),
            detail: history_row(r),
        })
        .collect()
}

/// Map a history snapshot to rows.
pub fn render_history(records: &[RequestRecord]) -> Vec<HistoryRow> {
    records.iter().map(history_row).collect()
}

fn history_row(record: &RequestRecord) -> HistoryRow {
    HistoryRow {
        duration: format!("{} ms", record.duration),
        sent: timestamp_or_placeholder(record.begin.as_ref()),
        received: timestamp_or_placeholder(record.end.as_ref()),
        created: timestamp_or_placeholder(record.created_date.as_ref()),
        request_id: record.request_id.clone(),
        status: record.status.into(),
        info: fault_info(record),
    }
}

fn timestamp_or_placeholder(ts: Option<&Timestamp>) -> String {
    ts.map(|t| t.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn fault_info(record: &RequestRecord) -> String {
    [record.fault_code.as_deref(), record.fault_string.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(": ")
}

/// The "last updated" line.
pub fn format_last_updated<Tz>(last_updated: Option<&DateTime<Tz>>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match last_updated {
        Some(ts) => format!(
            "Last update: {}",
            ts.format(crate::events::TIMESTAMP_FORMAT)
        ),
        None => "Last update: never".to_string(),
    }
}
