//! Integration tests for the listMethods mock responder

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::LIST_METHODS_ENVELOPE;
use std::sync::Arc;
use tower::Service;
use xrde2e::config::E2eConfig;
use xrde2e::mock::{create_router, MockState};

fn create_app() -> axum::Router {
    create_app_with_config(E2eConfig::default())
}

fn create_app_with_config(config: E2eConfig) -> axum::Router {
    create_router(Arc::new(MockState::new(&config)))
}

async fn get_body_string(response: axum::http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "text/xml")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_list_methods_is_rewritten() {
    let mut app = create_app();

    let response = app.call(post(LIST_METHODS_ENVELOPE)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/xml"
    );
    assert_eq!(
        get_body_string(response).await,
        "<methodCall><methodName>listMethodsResponse/example</methodName></methodCall>"
    );
}

#[tokio::test]
async fn test_body_without_marker_is_echoed() {
    let mut app = create_app();
    let body = "<Envelope><Body><getSecurityServerHealthData/></Body></Envelope>";

    let response = app.call(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_string(response).await, body);
}

#[tokio::test]
async fn test_any_content_type_is_accepted() {
    let mut app = create_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/soap+xml; charset=utf-8")
        .body(Body::from("listMethods/x"))
        .unwrap();

    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_string(response).await, "listMethodsResponse/x");
}

#[tokio::test]
async fn test_request_without_content_type_is_accepted() {
    let mut app = create_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("listMethods/"))
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(get_body_string(response).await, "listMethodsResponse/");
}

#[tokio::test]
async fn test_empty_body_returns_empty_xml() {
    let mut app = create_app();

    let response = app.call(post(Body::empty())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_string(response).await, "");
}

#[tokio::test]
async fn test_soap_envelope_is_preserved_around_marker() {
    let mut app = create_app();
    let envelope = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Header><xrd:id>abc-123</xrd:id></SOAP-ENV:Header>
  <SOAP-ENV:Body><xrd:listMethods/></SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    let response = app.call(post(envelope)).await.unwrap();
    let body = get_body_string(response).await;

    // "listMethods/" appears once, right before ">"
    assert_eq!(body, envelope.replacen("listMethods/", "listMethodsResponse/", 1));
    assert!(body.contains("<xrd:id>abc-123</xrd:id>"));
}

#[tokio::test]
async fn test_get_root_is_not_allowed() {
    let mut app = create_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = E2eConfig::default();
    config.server.max_body_bytes = 16;
    let mut app = create_app_with_config(config);

    let response = app.call(post("x".repeat(64))).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_metrics_endpoint_returns_200() {
    let mut app = create_app();

    // Generate some traffic first
    let _ = app.call(post(LIST_METHODS_ENVELOPE)).await.unwrap();

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}
