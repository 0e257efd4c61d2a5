//! Shared test utilities for xrde2e integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use xrde2e::config::DashboardConfig;
use xrde2e::monitor::HttpMonitorClient;

/// The end-to-end example envelope.
pub const LIST_METHODS_ENVELOPE: &str =
    "<methodCall><methodName>listMethods/example</methodName></methodCall>";

/// A successful request record as the backend serializes it.
pub fn record_json(server: &str, request_id: &str, duration: i64) -> Value {
    json!({
        "label": "",
        "securityServer": server,
        "producerMember": "FI/GOV/1234",
        "requestId": request_id,
        "status": true,
        "faultCode": null,
        "faultString": null,
        "duration": duration,
        "begin": 1_577_836_800_000i64,
        "end": 1_577_836_800_000i64 + duration,
        "createdDate": 1_577_836_800_000i64 + duration
    })
}

/// A failed request record with a fault.
pub fn failed_record_json(server: &str, request_id: &str) -> Value {
    json!({
        "label": "Failing",
        "securityServer": server,
        "requestId": request_id,
        "status": false,
        "faultCode": "Server.ServerProxy.ServiceFailed",
        "faultString": "Connection refused",
        "duration": 0,
        "begin": 1_577_836_800_000i64,
        "end": null,
        "createdDate": 1_577_836_800_000i64
    })
}

/// Dashboard config pointed at `base_url` with a short timeout.
pub fn dashboard_config(base_url: &str) -> DashboardConfig {
    DashboardConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        ..Default::default()
    }
}

/// HTTP monitor client pointed at `base_url`.
pub fn client(base_url: &str) -> HttpMonitorClient {
    HttpMonitorClient::new(dashboard_config(base_url)).unwrap()
}
