//! Snapshot payload parsing.

use super::error::FetchError;
use crate::events::RequestRecord;

/// Parse a snapshot body into request records, preserving order.
///
/// Rejects anything that is not a JSON array of records, and records whose
/// duration is negative although both timestamps are present.
pub fn parse_snapshot(body: &str) -> Result<Vec<RequestRecord>, FetchError> {
    let records: Vec<RequestRecord> =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    for record in &records {
        record.check_duration().map_err(FetchError::Malformed)?;
    }

    Ok(records)
}
