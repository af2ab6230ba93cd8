//! Integration tests for the HTTP API
//!
//! The router shares its state across clones, so one app drives a whole
//! session through successive `oneshot` calls.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{face, BALANCED};
use cubeguide::core::create_router;
use cubeguide::types::FaceRecognitionResult;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn new_session(app: &Router, body: Value) -> String {
    let (status, json) = send(app, "POST", "/session/new", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

async fn post_frame(app: &Router, id: &str, result: &FaceRecognitionResult) -> (StatusCode, Value) {
    let body = serde_json::to_value(result).unwrap();
    send(app, "POST", &format!("/session/{}/frame", id), Some(body)).await
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], cubeguide::VERSION);
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_create_session() {
    let app = create_router();
    let id = new_session(&app, json!({})).await;

    let (status, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session_id"], id.as_str());
    assert_eq!(json["phase"], "START");
    assert_eq!(json["error"], Value::Null);

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["sessions_active"], 1);
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_router();
    for (method, uri) in [
        ("GET", "/session/nonexistent"),
        ("POST", "/session/nonexistent/reset"),
        ("GET", "/session/nonexistent/instruction"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(json["error"], "session not found");
    }
}

#[tokio::test]
async fn test_frames_drive_phase() {
    let app = create_router();
    let id = new_session(&app, json!({})).await;

    let (status, first) = post_frame(&app, &id, &face(BALANCED[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["phase"], "START");
    assert_eq!(first["event"], Value::Null);

    let (_, second) = post_frame(&app, &id, &face(BALANCED[0])).await;
    assert_eq!(second["phase"], "GOT_IT");
    assert_eq!(second["event"]["kind"], "ENTERED");
    assert_eq!(second["event"]["is_new"], true);
    assert_eq!(second["transitions"][0]["reason"], "S001_FACE_RECORDED");
}

#[tokio::test]
async fn test_reset_is_deferred() {
    let app = create_router();
    let id = new_session(&app, json!({})).await;
    post_frame(&app, &id, &face(BALANCED[0])).await;
    post_frame(&app, &id, &face(BALANCED[0])).await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/reset", id), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["reset_pending"], true);

    let (_, snapshot) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(snapshot["phase"], "GOT_IT");

    let (_, out) = post_frame(&app, &id, &FaceRecognitionResult::Invalid).await;
    assert_eq!(out["reset_applied"], true);
    assert_eq!(out["phase"], "START");
}

#[tokio::test]
async fn test_readiness_update() {
    let app = create_router();
    let id = new_session(&app, json!({})).await;

    let uri = format!("/session/{}/readiness", id);
    let (status, json) = send(&app, "PUT", &uri, Some(json!({ "count": 7 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 7);

    let (_, snapshot) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(snapshot["readiness"], 7);
}

#[tokio::test]
async fn test_instruction_during_rotation() {
    let app = create_router();
    let id = new_session(&app, json!({ "config": { "got_it_dwell_frames": 0 } })).await;
    let uri = format!("/session/{}/instruction", id);

    let (_, none) = send(&app, "GET", &uri, None).await;
    assert_eq!(none["kind"], "NONE");

    for _ in 0..3 {
        post_frame(&app, &id, &face(BALANCED[0])).await;
    }
    let (status, rotation) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rotation["kind"], "FULL_ROTATION");
    assert_eq!(rotation["variant"], "RIGHT_TO_TOP");
}

#[tokio::test]
async fn test_unknown_mnemonic_rejected() {
    let app = create_router();
    let id = new_session(
        &app,
        json!({
            "solver": { "verify_code": 0, "solution": "U X" },
            "config": { "got_it_dwell_frames": 0 }
        }),
    )
    .await;
    send(
        &app,
        "PUT",
        &format!("/session/{}/readiness", id),
        Some(json!({ "count": cubeguide::REQUIRED_PRUNE_TABLES })),
    )
    .await;

    // Scan: two frames to accept, one dwell frame, four to look away.
    for codes in BALANCED {
        for _ in 0..3 {
            post_frame(&app, &id, &face(codes)).await;
        }
        for _ in 0..4 {
            post_frame(&app, &id, &FaceRecognitionResult::Invalid).await;
        }
    }
    let (_, out) = post_frame(&app, &id, &face(BALANCED[0])).await;
    assert_eq!(out["phase"], "SEARCHING");
    let (_, out) = post_frame(&app, &id, &face(BALANCED[0])).await;
    assert_eq!(out["phase"], "COMPLETE");

    // Verify, tables ready, solve.
    let mut last = Value::Null;
    for _ in 0..3 {
        last = post_frame(&app, &id, &face(BALANCED[0])).await.1;
    }
    assert_eq!(last["phase"], "SOLVED");

    let (status, json) = post_frame(&app, &id, &face(BALANCED[0])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("'X'"));
}
