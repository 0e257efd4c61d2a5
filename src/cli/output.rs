//! Output formatting helpers for CLI commands

use crate::dashboard::{CurrentRow, HistoryRow, StatusBadge};
use crate::events::RequestRecord;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

fn badge(status: StatusBadge) -> String {
    match status {
        StatusBadge::Ok => status.label().green().bold().to_string(),
        StatusBadge::Nok => status.label().red().bold().to_string(),
    }
}

fn sent_received(row: &HistoryRow) -> String {
    format!("Sent: {}\nReceived: {}", row.sent, row.received)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format the current snapshot as a numbered table.
///
/// Row numbers are 1-based and select the row for drill-down.
pub fn format_current_table(rows: &[CurrentRow]) -> String {
    let mut table = new_table(vec![
        "#",
        "Server",
        "Duration",
        "Sent / Received",
        "Created",
        "Request Id",
        "Status",
        "Info",
    ]);

    for (i, row) in rows.iter().enumerate() {
        let server = if row.server == row.server_id {
            row.server.clone()
        } else {
            format!("{}\n{}", row.server, row.server_id.dimmed())
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(server),
            Cell::new(&row.detail.duration),
            Cell::new(sent_received(&row.detail)),
            Cell::new(&row.detail.created),
            Cell::new(&row.detail.request_id),
            Cell::new(badge(row.detail.status)),
            Cell::new(&row.detail.info),
        ]);
    }

    table.to_string()
}

/// Format a history snapshot as a table.
pub fn format_history_table(rows: &[HistoryRow]) -> String {
    let mut table = new_table(vec![
        "Duration",
        "Sent / Received",
        "Created",
        "Request Id",
        "Status",
        "Info",
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.duration),
            Cell::new(sent_received(row)),
            Cell::new(&row.created),
            Cell::new(&row.request_id),
            Cell::new(badge(row.status)),
            Cell::new(&row.info),
        ]);
    }

    table.to_string()
}

/// Format records as pretty JSON, in the backend's field names.
pub fn format_records_json(records: &[RequestRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
