//! Integration tests for the appliance status registry endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: appliances start idle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn appliances_start_idle_with_empty_user() {
    let app = common::build_test_app();

    for appliance in ["washer", "dryer"] {
        let response = get(app.clone(), &format!("/{appliance}/getAgentStatus")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "idle");
        assert_eq!(json["user"], "");
    }
}

// ---------------------------------------------------------------------------
// Test: set monitor then read it back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_monitor_round_trips() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/dryer/setAgentStatus",
        json!({ "status": "monitor", "user": "user1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Agent status set successfully");
    assert_eq!(json["status"], "monitor");
    assert_eq!(json["user"], "user1");

    let response = get(app.clone(), "/dryer/getAgentStatus").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "monitor");
    assert_eq!(json["user"], "user1");

    // The other appliance is untouched.
    let response = get(app, "/washer/getAgentStatus").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "idle");
}

// ---------------------------------------------------------------------------
// Test: setting idle twice is idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn double_idle_is_idempotent() {
    let app = common::build_test_app();

    post_json(
        app.clone(),
        "/washer/setAgentStatus",
        json!({ "status": "monitor", "user": "user2" }),
    )
    .await;

    let first = post_json(
        app.clone(),
        "/washer/setAgentStatus",
        json!({ "status": "idle" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;

    let second = post_json(
        app.clone(),
        "/washer/setAgentStatus",
        json!({ "status": "idle" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    assert_eq!(first, second);
    assert_eq!(second["status"], "idle");
    assert_eq!(second["user"], "");

    let response = get(app, "/washer/getAgentStatus").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "idle");
    assert_eq!(json["user"], "");
}

// ---------------------------------------------------------------------------
// Test: validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_status_value_is_rejected() {
    let app = common::build_test_app();

    let response = post_json(
        app,
        "/dryer/setAgentStatus",
        json!({ "status": "running", "user": "user1" }),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[tokio::test]
async fn monitor_without_user_is_rejected() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/dryer/setAgentStatus",
        json!({ "status": "monitor" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = post_json(
        app.clone(),
        "/dryer/setAgentStatus",
        json!({ "status": "monitor", "user": "" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    // The failed requests must not have armed monitoring.
    let response = get(app, "/dryer/getAgentStatus").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "idle");
}

#[tokio::test]
async fn unknown_appliance_is_404() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/toaster/getAgentStatus").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    let response = post_json(
        app,
        "/toaster/setAgentStatus",
        json!({ "status": "idle" }),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: user display info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_names_returns_both_profiles() {
    let app = common::build_test_app();

    let response = get(app, "/users/names").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user1"]["name"], "User1");
    assert_eq!(json["user1"]["color"], "#3b82f6");
    assert_eq!(json["user2"]["name"], "User2");
    assert_eq!(json["user2"]["color"], "#22c55e");
}
