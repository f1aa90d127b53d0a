#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use topic_trivia::{router, services::generation::GenerationConfig, AppState};
use tower::ServiceExt;

/// Router with no API key, so every batch comes from the fallback bank.
pub fn app_without_key() -> Router {
    router(AppState::new(GenerationConfig::new(None)))
}

/// Router with a key but a provider address nothing listens on.
pub fn app_with_unreachable_provider() -> Router {
    let config = GenerationConfig::new(Some("sk-test".to_string()))
        .with_base_url("http://127.0.0.1:9/v1")
        .with_timeout(Duration::from_secs(2));
    router(AppState::new(config))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request build should succeed")
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, json)
}
