//! # Metrics
//!
//! Prometheus counters for the mock responder and the dashboard poller.
//!
//! **Counters:**
//! - `xrde2e_mock_requests_total{rewritten}` - Requests answered by the mock
//! - `xrde2e_dashboard_polls_total{outcome}` - Current-snapshot polls
//! - `xrde2e_dashboard_drilldowns_total{outcome}` - History fetches
//!
//! **Histograms:**
//! - `xrde2e_mock_request_duration_seconds` - Mock handler latency
//!
//! The mock server exposes these at `GET /metrics`. The dashboard does the
//! same on `dashboard.metrics_port` when it is set.

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use std::sync::OnceLock;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const MOCK_REQUESTS_TOTAL: &str = "xrde2e_mock_requests_total";
pub const MOCK_REQUEST_DURATION_SECONDS: &str = "xrde2e_mock_request_duration_seconds";
pub const DASHBOARD_POLLS_TOTAL: &str = "xrde2e_dashboard_polls_total";
pub const DASHBOARD_DRILLDOWNS_TOTAL: &str = "xrde2e_dashboard_drilldowns_total";

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed in this process.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.5, 1.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(MOCK_REQUEST_DURATION_SECONDS.to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Handle of the process-wide recorder, installing it on first use.
///
/// Falls back to a detached handle if some other recorder was installed
/// first.
pub fn metrics_handle() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            setup_metrics().unwrap_or_else(|e| {
                tracing::debug!("Metrics already initialized, creating new handle: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            })
        })
        .clone()
}
