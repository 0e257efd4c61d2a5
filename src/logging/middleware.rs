//! Access-log span construction for the mock server

use axum::http::Request;
use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// # Examples
///
/// ```
/// use xrde2e::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span opened for every request the mock receives.
///
/// Used as `TraceLayer::make_span_with`; the request ID ties the handler's
/// access-log line to the layer's response line.
pub fn make_request_span<B>(request: &Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        request_id = %generate_request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
