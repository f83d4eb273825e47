//! Health Check and Metrics API Tests

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use crate::common::TestApp;

fn server() -> TestServer {
    TestServer::new(TestApp::new().router).unwrap()
}

#[tokio::test]
async fn test_health_check_returns_ok() {
    let server = server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_liveness_probe() {
    let server = server();

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

/// The test database URL points at a closed port.
#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let server = server();

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let server = server();
    server.get("/health").await.assert_status_ok();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("gun_store_http_requests_total"));
    assert!(text.contains("path=\"/health\""));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = server();

    server
        .get("/does-not-exist")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
