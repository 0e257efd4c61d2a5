//! `POST /` handler.

use super::MockState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Instant;

/// Method name marker looked up in the request envelope.
pub const METHOD_MARKER: &str = "listMethods/";

/// Replacement for [`METHOD_MARKER`].
pub const RESPONSE_MARKER: &str = "listMethodsResponse/";

/// Rewrite the first `listMethods/` into `listMethodsResponse/`.
///
/// Everything else is left untouched; a body without the marker comes back
/// unchanged.
///
/// # Examples
///
/// ```
/// use xrde2e::mock::rewrite_method_name;
///
/// let body = "<methodName>listMethods/example</methodName>";
/// assert_eq!(
///     rewrite_method_name(body),
///     "<methodName>listMethodsResponse/example</methodName>"
/// );
/// ```
pub fn rewrite_method_name(body: &str) -> String {
    body.replacen(METHOD_MARKER, RESPONSE_MARKER, 1)
}

/// POST / - Echo the envelope with the method name rewritten.
///
/// Any content type is accepted; the body is read as text.
pub async fn handle(State(state): State<Arc<MockState>>, body: Bytes) -> impl IntoResponse {
    let start = Instant::now();
    let text = String::from_utf8_lossy(&body);
    let rewritten = text.contains(METHOD_MARKER);
    let response = rewrite_method_name(&text);

    tracing::info!(
        bytes = body.len(),
        rewritten,
        body = crate::logging::body_preview(&text, state.log_bodies).as_deref(),
        "Request received"
    );

    metrics::counter!(crate::metrics::MOCK_REQUESTS_TOTAL,
        "rewritten" => rewritten.to_string()
    )
    .increment(1);
    metrics::histogram!(crate::metrics::MOCK_REQUEST_DURATION_SECONDS)
        .record(start.elapsed().as_secs_f64());

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/xml")], response)
}
