//! Helpers for building log field values.

/// Longest body or payload excerpt written to the log, in characters.
pub const PREVIEW_CHARS: usize = 200;

/// Excerpt of a request body for the access log, only when body logging is on.
///
/// # Examples
///
/// ```
/// use xrde2e::logging::body_preview;
///
/// assert_eq!(body_preview("<methodCall/>", false), None);
/// assert_eq!(body_preview("<methodCall/>", true).as_deref(), Some("<methodCall/>"));
/// ```
pub fn body_preview(body: &str, enabled: bool) -> Option<String> {
    if !enabled || body.is_empty() {
        return None;
    }
    Some(truncate_chars(body, PREVIEW_CHARS))
}

/// Excerpt of a raw error payload, if there is one.
pub fn payload_preview(payload: Option<&str>) -> String {
    match payload {
        Some(p) if !p.is_empty() => truncate_chars(p, PREVIEW_CHARS),
        _ => "-".to_string(),
    }
}

/// Truncate to at most `max_chars` characters, marking the cut with `...`.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
