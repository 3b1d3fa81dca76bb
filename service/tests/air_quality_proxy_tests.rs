//! Integration tests for `GET /api/qweather/now[/{location}]`.
//!
//! The real `HttpAirQualityClient` is pointed at a stubbed upstream and the
//! proxy router is driven with `oneshot`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::get_json;
use common::http_mock::MockHttpServer;
use routeviz_api::app::proxy_app;
use routeviz_api::config::{AirConfig, CorsConfig};
use routeviz_api::proxy::mock::{MockAirQualityClient, MockBotStatusClient};
use routeviz_api::proxy::{AirQualityClient, AirQualityError, HttpAirQualityClient};
use serde_json::{json, Value};

const AIR_PATH: &str = "/v7/air/now";
const API_KEY: &str = "test-air-key";

fn air_config(api_host: String, timeout_ms: u64) -> AirConfig {
    AirConfig {
        api_host,
        api_key: API_KEY.into(),
        timeout_ms,
        ..AirConfig::default()
    }
}

fn app_with(client: impl AirQualityClient + 'static) -> axum::Router {
    proxy_app(
        Arc::new(MockBotStatusClient::new()),
        Arc::new(client),
        &CorsConfig::default(),
    )
}

fn readings() -> Value {
    json!({"pubTime": "2026-10-18T10:00+08:00", "aqi": "46", "category": "优", "pm2p5": "21"})
}

fn placeholder() -> Value {
    json!({"aqi": "--", "category": "无数据"})
}

/// The default route queries the configured default location with the API key.
#[tokio::test]
async fn test_default_location_relays_readings() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .with_query("location", "101210113")
        .with_query("key", API_KEY)
        .respond_with_json(json!({"code": "200", "now": readings()}))
        .expect_times(1)
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["air"], readings());
    assert_eq!(body["location"], json!("101210113"));
    server.verify().await;
}

/// The stamp is local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
#[tokio::test]
async fn test_report_carries_update_time() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .respond_with_json(json!({"code": "200", "now": readings()}))
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (_, body) = get_json(app_with(client), "/api/qweather/now").await;

    let stamp = body["updateTime"].as_str().expect("updateTime");
    assert!(
        chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok(),
        "unexpected stamp {stamp}"
    );
}

/// A location in the path overrides the default.
#[tokio::test]
async fn test_explicit_location_is_forwarded() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .with_query("location", "101230201")
        .respond_with_json(json!({"code": "200", "now": readings()}))
        .expect_times(1)
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now/101230201").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], json!("101230201"));
    server.verify().await;
}

/// An error code in an HTTP 200 body is a failure.
#[tokio::test]
async fn test_api_error_code_returns_500_with_placeholder() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .respond_with_json(json!({"code": "401"}))
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "air quality API returned code 401", "air": placeholder()})
    );
}

#[tokio::test]
async fn test_missing_readings_return_500() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .respond_with_json(json!({"code": "200", "now": {}}))
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["air"], placeholder());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upstream_http_error_returns_500() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .respond_with_status(403)
        .with_json_response(json!({"error": {"status": 403, "title": "Forbidden"}}))
        .mount()
        .await;

    let client =
        HttpAirQualityClient::from_config(&air_config(server.url(), 10_000)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Request failed with status code 403"));
    assert_eq!(body["air"], placeholder());
}

#[tokio::test]
async fn test_upstream_timeout_returns_500() {
    let server = MockHttpServer::start().await;
    server
        .expect_get(AIR_PATH)
        .respond_with_json(json!({"code": "200", "now": readings()}))
        .respond_with_delay(Duration::from_secs(5))
        .mount()
        .await;

    let client = HttpAirQualityClient::from_config(&air_config(server.url(), 100)).expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["air"], placeholder());
}

#[tokio::test]
async fn test_connection_failure_returns_500() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = HttpAirQualityClient::from_config(&air_config(format!("http://{addr}"), 5_000))
        .expect("client");
    let (status, body) = get_json(app_with(client), "/api/qweather/now/101010100").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

/// Handler-level behavior with the mock client.
#[tokio::test]
async fn test_handler_with_mock_client() {
    let mock = Arc::new(MockAirQualityClient::with_result(Ok(readings())));
    let app = proxy_app(
        Arc::new(MockBotStatusClient::new()),
        mock.clone(),
        &CorsConfig::default(),
    );

    let (status, body) = get_json(app, "/api/qweather/now").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["air"], readings());
    assert_eq!(mock.locations(), vec!["101210113".to_string()]);
}

#[tokio::test]
async fn test_handler_maps_mock_error() {
    let mock = MockAirQualityClient::with_result(Err(AirQualityError::Incomplete));

    let (status, body) = get_json(app_with(mock), "/api/qweather/now/101020100").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        json!("air quality response has no current readings")
    );
}
