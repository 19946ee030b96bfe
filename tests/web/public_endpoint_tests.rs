//! # Public Endpoint Tests
//!
//! Health message, JSON fallbacks for unknown routes and methods, and the
//! request id header every response carries.

use super::test_infrastructure::*;
use serde_json::json;

#[tokio::test]
async fn test_root_reports_service_running() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let response = client.get("/").await.expect("Failed to send request");
    let body = assert_json_response(response, 200)
        .await
        .expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Chained Form API is running"}));

    server.shutdown().await.expect("Failed to shutdown test server");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let response = client
        .get("/api/does-not-exist")
        .await
        .expect("Failed to send request");
    let body = assert_json_response(response, 404)
        .await
        .expect("Failed to parse response");
    assert_eq!(body, json!({"detail": "Not Found"}));

    server.shutdown().await.expect("Failed to shutdown test server");
}

#[tokio::test]
async fn test_wrong_method_returns_json_405() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let response = client
        .get("/api/submit")
        .await
        .expect("Failed to send request");
    let body = assert_json_response(response, 405)
        .await
        .expect("Failed to parse response");
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));

    server.shutdown().await.expect("Failed to shutdown test server");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let first = client.get("/").await.expect("Failed to send request");
    let second = client.get("/").await.expect("Failed to send request");

    let first_id = first
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header should be present");
    let second_id = second
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header should be present");

    assert!(!first_id.is_empty());
    assert_ne!(first_id, second_id);

    server.shutdown().await.expect("Failed to shutdown test server");
}
