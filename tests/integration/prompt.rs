//! Single-prompt endpoint integration tests
//!
//! Tests for POST /api/ai, which sends one prompt as a `user` turn. Replies
//! serve both the `{text}` and the `{success, result, error}` client shapes.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_prompt_returns_text() {
    let app = TestApp::new().await;
    app.provider.mock_chat_completion_success("a short poem").await;

    let response = app
        .server
        .post("/api/ai")
        .json(&json!({"prompt": "write a poem", "max_tokens": 600}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"text": "a short poem", "success": true, "result": "a short poem"})
    );

    let bodies = app.provider.chat_request_bodies().await;
    assert_eq!(
        bodies[0]["messages"],
        json!([{"role": "user", "content": "write a poem"}])
    );
    assert_eq!(bodies[0]["max_tokens"], 600);
}

#[tokio::test]
async fn test_prompt_accepts_input_field() {
    let app = TestApp::new().await;
    app.provider.mock_chat_completion_success("ok").await;

    let response = app
        .server
        .post("/api/ai")
        .json(&json!({"provider": "openai", "model": "gpt-4o-mini", "input": "hello"}))
        .await;

    response.assert_status_ok();
    let bodies = app.provider.chat_request_bodies().await;
    assert_eq!(bodies[0]["model"], "gpt-4o-mini");
    assert_eq!(bodies[0]["max_tokens"], 800);
}

#[tokio::test]
async fn test_blank_prompt_is_rejected() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/ai").json(&json!({"prompt": "  "})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": false, "error": "prompt required"})
    );
    assert!(app.provider.chat_requests().await.is_empty());
}

#[tokio::test]
async fn test_integration_client_contract() {
    let app = TestApp::new().await;
    app.provider.mock_chat_completion_success("hello back").await;

    let response = app
        .server
        .post("/api/ai")
        .json(&json!({
            "provider": "openai",
            "model": "gpt-4o-mini",
            "input": "hi",
            "meta": {}
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], "hello back");
    assert_eq!(body["text"], "hello back");
}

#[tokio::test]
async fn test_provider_failure_reports_success_false() {
    let app = TestApp::new().await;
    app.provider.mock_chat_completion_unauthorized().await;

    let response = app
        .server
        .post("/api/ai")
        .json(&json!({"input": "hi", "meta": {}}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": false, "error": "Invalid API key provided"})
    );
}

#[tokio::test]
async fn test_malformed_prompt_body_reports_success_false() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/ai").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": false, "error": "Invalid request body"})
    );
}
