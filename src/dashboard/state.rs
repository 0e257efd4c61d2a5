//! Immutable dashboard snapshots.

use crate::events::RequestRecord;
use chrono::{DateTime, Local};

/// What the dashboard shows: the latest successful snapshot and when it was
/// taken.
///
/// Each successful poll produces a new value that replaces the previous one
/// wholesale; a failed poll produces nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Records of the most recent successful poll, in backend order
    pub records: Vec<RequestRecord>,
    /// Local time of the most recent successful poll
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(records: Vec<RequestRecord>, last_updated: DateTime<Local>) -> Self {
        Self {
            records,
            last_updated: Some(last_updated),
        }
    }

    /// True until the first successful poll.
    pub fn is_initial(&self) -> bool {
        self.last_updated.is_none()
    }
}
