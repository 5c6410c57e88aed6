//! # Parley HTTP Integration Tests
//!
//! File: cli/tests/http.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives the full `parley serve` router, middleware included, in-process
//! with `tower::ServiceExt::oneshot`. No socket is bound.
//!

mod common;
use common::*;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use parley::commands::serve::{config::ServerConfig, server_logic::create_app};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_app(&ServerConfig::default(), Arc::new(seeded_responder(3)))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn ask(app: Router, message: &str) -> (StatusCode, Value) {
    let body = json!({ "message": message }).to_string();
    let (status, text) = send(app, post_json("/ask", &body)).await;
    (status, serde_json::from_str(&text).unwrap())
}

/// `GET /` serves the chat page as HTML.
#[tokio::test]
async fn test_get_root_serves_chat_page() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/ask"));
}

/// `POST /ask` answers arithmetic.
#[tokio::test]
async fn test_ask_arithmetic() {
    let (status, body) = ask(app(), "what is 2+2?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "**2+2 = 4**" }));
}

/// `POST /` behaves like `POST /ask`.
#[tokio::test]
async fn test_post_root_answers() {
    let (status, text) = send(app(), post_json("/", r#"{"message":"speed of light?"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["reply"], "299,792,458 m/s.");
}

/// Missing, blank and unparseable messages all get `400 {"reply":"Empty"}`.
#[tokio::test]
async fn test_unusable_messages_are_rejected() {
    for body in [r#"{}"#, r#"{"message":""}"#, r#"{"message":"  \n "}"#, "not json"] {
        let (status, text) = send(app(), post_json("/ask", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        let reply: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reply, json!({ "reply": "Empty" }), "body: {body}");
    }
}

/// A body without a JSON content type is rejected the same way.
#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let request = Request::post("/ask")
        .body(Body::from(r#"{"message":"hi"}"#))
        .unwrap();
    let (status, text) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, r#"{"reply":"Empty"}"#);
}

/// Only `POST` is routed on `/ask`.
#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/ask")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method: {method}"
        );
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = app()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Facts taught through one request are visible to the next.
#[tokio::test]
async fn test_teach_then_ask_shares_knowledge() {
    let app = app();

    let (status, body) = ask(app.clone(), "teach me: favourite editor => Helix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Learned: **favourite editor** → Helix");

    let (status, body) = ask(app, "What's your favourite editor?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Helix");
}

/// Requests against the same responder from many tasks all get answers.
#[tokio::test]
async fn test_concurrent_requests() {
    let app = app();
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { ask(app, &format!("what is {i} * 2")).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], format!("**{i}*2 = {}**", i * 2));
    }
}
