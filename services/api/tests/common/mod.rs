//! Shared helpers for driving the router in-process.
#![allow(dead_code)]

use api_lib::{config::Config, web};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use studytrack_core::memory::InMemoryStore;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn app(store: InMemoryStore) -> Router {
    let state = web::AppState::new(Arc::new(store), Arc::new(test_config()));
    web::router(Arc::new(state))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

/// Sends `raw` verbatim as a JSON-typed body.
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send(app, Method::POST, "/v1/users", Some(serde_json::json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_subject(app: &Router, user_id: &str, name: &str) -> String {
    let uri = format!("/v1/users/{}/subjects", user_id);
    let (status, body) = send(app, Method::POST, &uri, Some(serde_json::json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

pub async fn log_minutes(app: &Router, user_id: &str, subject_id: &str, studied_at: &str, minutes: i32) {
    let uri = format!("/v1/users/{}/study-logs", user_id);
    let body = serde_json::json!({
        "subjectId": subject_id,
        "studiedAt": studied_at,
        "minutes": minutes,
    });
    let (status, _) = send(app, Method::POST, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}
