//! Helpers for driving the router in-process

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use task_core::Task;
use tower::ServiceExt;

/// Status and parsed JSON body (`Value::Null` when the body is empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, json: impl Into<String>) -> TestResponse {
    send(app, Method::POST, uri, Some(json.into())).await
}

pub async fn put(app: &Router, uri: &str, json: impl Into<String>) -> TestResponse {
    send(app, Method::PUT, uri, Some(json.into())).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

pub async fn list(app: &Router) -> Vec<Task> {
    let response = get(app, "/tasks").await;
    assert_eq!(response.status, StatusCode::OK);
    serde_json::from_value(response.body).unwrap()
}

/// The `(loc, type)` pairs of a 422 body
pub fn violations(body: &Value) -> Vec<(Vec<String>, String)> {
    body["detail"]
        .as_array()
        .expect("422 detail is an array")
        .iter()
        .map(|entry| {
            let loc = entry["loc"]
                .as_array()
                .unwrap()
                .iter()
                .map(|part| part.as_str().unwrap().to_string())
                .collect();
            (loc, entry["type"].as_str().unwrap().to_string())
        })
        .collect()
}
