//! # Submission Endpoint Tests
//!
//! `POST /api/submit` over HTTP: accepted submissions, semantic rule failures
//! (joined string `detail`) and decode failures (list `detail`).

use super::test_infrastructure::*;
use serde_json::{json, Value};
use uuid::Uuid;

async fn submit(body: Value) -> (u16, Value) {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let response = client
        .post_json("/api/submit", &body)
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let json: Value = response.json().await.expect("Failed to parse JSON");

    server.shutdown().await.expect("Failed to shutdown test server");
    (status, json)
}

async fn assert_accepted(body: Value) -> Uuid {
    let (status, json) = submit(body).await;
    assert_eq!(status, 200, "unexpected rejection: {json}");
    assert_eq!(json["status"], "ok");
    let id = json["id"].as_str().expect("id should be a string");
    Uuid::parse_str(id).expect("id should be a UUID")
}

async fn assert_semantic_rejection(body: Value, expected: &str) {
    let (status, json) = submit(body).await;
    assert_eq!(status, 422, "unexpected status for {json}");
    let detail = semantic_detail(&json);
    assert!(
        detail.contains(expected),
        "detail '{detail}' should contain '{expected}'"
    );
}

async fn assert_decode_rejection(body: Value, expected_fields: &[&str]) -> Vec<Value> {
    let (status, json) = submit(body).await;
    assert_eq!(status, 422, "unexpected status for {json}");
    let errors = json["detail"]
        .as_array()
        .expect("decode errors should be reported as a list")
        .clone();

    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["loc"][1].as_str().unwrap_or(""))
        .collect();
    assert_eq!(fields, expected_fields);
    for error in &errors {
        assert_eq!(error["loc"][0], "body");
        assert!(error["msg"].is_string());
        assert!(error["type"].is_string());
    }
    errors
}

#[tokio::test]
async fn test_success_date_path_advanced() {
    assert_accepted(json!({
        "mode": "Advanced",
        "category": "Schedule",
        "choose_date": "2024-01-15",
        "budget": 5000
    }))
    .await;
}

#[tokio::test]
async fn test_success_time_path_basic() {
    assert_accepted(json!({
        "mode": "Basic",
        "topic": "quick note",
        "choose_time": "14:30",
        "urgency": "High"
    }))
    .await;
}

#[tokio::test]
async fn test_success_time_path_advanced_realtime() {
    assert_accepted(json!({
        "mode": "Advanced",
        "category": "Realtime",
        "choose_time": "09:15",
        "urgency": "Normal"
    }))
    .await;
}

#[tokio::test]
async fn test_success_time_path_advanced_analytics() {
    assert_accepted(json!({
        "mode": "Advanced",
        "category": "Analytics",
        "choose_time": "16:45:30",
        "urgency": "Low"
    }))
    .await;
}

#[tokio::test]
async fn test_success_date_path_basic() {
    assert_accepted(json!({
        "mode": "Basic",
        "topic": "Birthday DATE planning",
        "choose_date": "2024-12-25",
        "budget": 0
    }))
    .await;
}

#[tokio::test]
async fn test_missing_mode_is_a_decode_error() {
    let errors = assert_decode_rejection(
        json!({
            "topic": "test topic",
            "choose_time": "12:00",
            "urgency": "High"
        }),
        &["mode"],
    )
    .await;
    assert_eq!(errors[0]["type"], "missing");
    assert_eq!(errors[0]["msg"], "Field required");
}

#[tokio::test]
async fn test_basic_mode_missing_topic() {
    assert_semantic_rejection(
        json!({"mode": "Basic", "choose_time": "12:00", "urgency": "High"}),
        "Topic is required",
    )
    .await;
}

#[tokio::test]
async fn test_advanced_mode_missing_category() {
    assert_semantic_rejection(
        json!({"mode": "Advanced", "choose_time": "12:00", "urgency": "High"}),
        "Category is required",
    )
    .await;
}

#[tokio::test]
async fn test_basic_date_path_missing_date() {
    assert_semantic_rejection(
        json!({"mode": "Basic", "topic": "date reminder", "budget": 1000}),
        "Date is required",
    )
    .await;
}

#[tokio::test]
async fn test_basic_time_path_missing_time() {
    assert_semantic_rejection(
        json!({"mode": "Basic", "topic": "quick note", "urgency": "High"}),
        "Time is required",
    )
    .await;
}

#[tokio::test]
async fn test_advanced_schedule_missing_date() {
    assert_semantic_rejection(
        json!({"mode": "Advanced", "category": "Schedule", "budget": 1000}),
        "Date is required for Schedule category",
    )
    .await;
}

#[tokio::test]
async fn test_date_path_missing_budget() {
    assert_semantic_rejection(
        json!({"mode": "Advanced", "category": "Schedule", "choose_date": "2024-01-15"}),
        "Budget is required",
    )
    .await;
}

#[tokio::test]
async fn test_time_path_missing_urgency() {
    assert_semantic_rejection(
        json!({"mode": "Basic", "topic": "quick note", "choose_time": "14:30"}),
        "Urgency is required",
    )
    .await;
}

#[tokio::test]
async fn test_all_chain_errors_are_joined() {
    let (status, json) = submit(json!({"mode": "Basic"})).await;
    assert_eq!(status, 422);
    assert_eq!(
        semantic_detail(&json),
        "Topic is required for Basic mode; Urgency is required when on time path"
    );
}

async fn assert_budget_rejected(budget: i64, expected: &str) {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Advanced",
            "category": "Schedule",
            "choose_date": "2024-01-15",
            "budget": budget
        }),
        &["budget"],
    )
    .await;
    assert_eq!(errors[0]["type"], "value_error");
    let msg = errors[0]["msg"].as_str().unwrap_or_default();
    assert!(msg.contains(expected), "msg '{msg}' should contain '{expected}'");
}

#[tokio::test]
async fn test_budget_not_multiple_of_100() {
    assert_budget_rejected(1234, "multiple of 100").await;
}

#[tokio::test]
async fn test_budget_below_range() {
    assert_budget_rejected(-100, "between 0 and 5000").await;
}

#[tokio::test]
async fn test_budget_above_range() {
    assert_budget_rejected(6000, "between 0 and 5000").await;
}

#[tokio::test]
async fn test_empty_topic_is_a_field_error() {
    let errors = assert_decode_rejection(json!({"mode": "Basic", "topic": ""}), &["topic"]).await;
    assert_eq!(errors[0]["type"], "value_error");
    assert_eq!(errors[0]["msg"], "Value error, Topic is required for Basic mode");
}

#[tokio::test]
async fn test_null_category_is_a_field_error() {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Advanced",
            "category": null,
            "choose_time": "12:00",
            "urgency": "High"
        }),
        &["category"],
    )
    .await;
    assert_eq!(
        errors[0]["msg"],
        "Value error, Category is required for Advanced mode"
    );
}

#[tokio::test]
async fn test_null_date_on_schedule_path_is_a_field_error() {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Advanced",
            "category": "Schedule",
            "choose_date": null,
            "budget": 1000
        }),
        &["choose_date"],
    )
    .await;
    assert_eq!(
        errors[0]["msg"],
        "Value error, Date is required for Schedule category"
    );
}

#[tokio::test]
async fn test_single_digit_time_is_a_decode_error() {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Basic",
            "topic": "quick note",
            "choose_time": "1:5",
            "urgency": "High"
        }),
        &["choose_time"],
    )
    .await;
    assert_eq!(errors[0]["type"], "time_parsing");
}

#[tokio::test]
async fn test_budget_valid_value() {
    assert_accepted(json!({
        "mode": "Advanced",
        "category": "Schedule",
        "choose_date": "2024-01-15",
        "budget": 2500
    }))
    .await;
}

#[tokio::test]
async fn test_non_integer_budget_is_a_decode_error() {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Advanced",
            "category": "Schedule",
            "choose_date": "2024-01-15",
            "budget": "a lot"
        }),
        &["budget"],
    )
    .await;
    assert_eq!(errors[0]["type"], "int_parsing");
}

#[tokio::test]
async fn test_every_malformed_field_is_reported() {
    let errors = assert_decode_rejection(
        json!({
            "mode": "Advanced",
            "category": "Weekly",
            "choose_date": "15/01/2024",
            "urgency": "Critical"
        }),
        &["category", "choose_date", "urgency"],
    )
    .await;
    assert_eq!(errors[0]["type"], "literal_error");
    assert_eq!(errors[1]["type"], "date_parsing");
    assert_eq!(errors[2]["type"], "literal_error");
}

#[tokio::test]
async fn test_malformed_time_is_a_decode_error() {
    assert_decode_rejection(
        json!({
            "mode": "Basic",
            "topic": "quick note",
            "choose_time": "half past two",
            "urgency": "High"
        }),
        &["choose_time"],
    )
    .await;
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let response = client
        .post_raw("/api/submit", "{\"mode\": ")
        .await
        .expect("Failed to send request");
    let body = assert_json_response(response, 422)
        .await
        .expect("Failed to parse response");
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    server.shutdown().await.expect("Failed to shutdown test server");
}

#[tokio::test]
async fn test_repeat_submission_gets_distinct_ids() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let client = WebTestClient::for_server(&server).expect("Failed to create test client");

    let payload = json!({
        "mode": "Basic",
        "topic": "quick note",
        "choose_time": "14:30",
        "urgency": "High"
    });

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = client
            .post_json("/api/submit", &payload)
            .await
            .expect("Failed to send request");
        let body = assert_json_response(response, 200)
            .await
            .expect("Failed to parse response");
        ids.push(body["id"].as_str().unwrap_or_default().to_string());
    }

    assert_ne!(ids[0], ids[1]);

    server.shutdown().await.expect("Failed to shutdown test server");
}
