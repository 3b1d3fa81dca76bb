//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`http_mock::MockHttpServer`] - wiremock wrapper for stubbing the resource server and upstream APIs
//! - [`fixtures_dir`] - path to the bundled fixtures
//! - [`get_json`] / [`post_json`] - drive an axum `Router` with `oneshot` and decode the reply
//!
//! # Router Usage
//!
//! ```ignore
//! use crate::common::get_json;
//!
//! #[tokio::test]
//! async fn test_with_app() {
//!     let app = proxy_app(
//!         Arc::new(MockBotStatusClient::new()),
//!         Arc::new(MockAirQualityClient::new()),
//!         &CorsConfig::default(),
//!     );
//!     let (status, body) = get_json(app, "/api/bot-status").await;
//! }
//! ```

#![allow(dead_code)]

pub mod http_mock;

use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Bundled fixture directory (`service/fixtures`).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
}

/// Send a request through `app` and decode the body as JSON (`Null` when empty).
pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

pub async fn post_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::POST, uri).await
}

/// True when `actual` has exactly the top-level keys of `expected`, each
/// holding the same JSON kind.
pub fn same_top_level_shape(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(e), Value::Object(a)) => {
            e.len() == a.len()
                && e.iter().all(|(key, value)| {
                    a.get(key)
                        .is_some_and(|other| kind(value) == kind(other))
                })
        }
        _ => kind(expected) == kind(actual),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
