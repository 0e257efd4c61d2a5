//! # listMethods mock responder
//!
//! Answers a `listMethods` RPC call by echoing the envelope back with the
//! method name rewritten to `listMethodsResponse`.
//!
//! ## Endpoints
//!
//! - `POST /` - Rewrite and echo the body as `text/xml`
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use xrde2e::mock::{create_router, MockState};
//! use xrde2e::config::E2eConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = E2eConfig::default();
//! let state = Arc::new(MockState::new(&config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8081").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod handler;

pub use handler::{rewrite_method_name, METHOD_MARKER, RESPONSE_MARKER};

use crate::config::E2eConfig;
use crate::metrics::PrometheusHandle;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared state of the mock server.
pub struct MockState {
    /// Include request bodies in the access log
    pub log_bodies: bool,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
    /// Prometheus handle for `/metrics`
    pub prometheus: PrometheusHandle,
}

impl MockState {
    pub fn new(config: &E2eConfig) -> Self {
        Self {
            log_bodies: config.logging.log_bodies,
            max_body_bytes: config.server.max_body_bytes,
            prometheus: crate::metrics::metrics_handle(),
        }
    }
}

/// Create the mock router.
pub fn create_router(state: Arc<MockState>) -> Router {
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route("/", post(handler::handle))
        .merge(crate::metrics::handler::router(state.prometheus.clone()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(crate::logging::make_request_span::<Body>)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
