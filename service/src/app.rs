//! Router assembly shared by the binaries and the integration tests.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::http::{cors_layer, health_check};
use crate::mock::{self, MockProvider};
use crate::proxy::{self, AirQualityClient, BotStatusClient};
use crate::rest;

/// Proxy server: bot status/chat, air quality, route charts, pages and `/health`.
///
/// Layer order: routes, then the upstream client extensions, CORS, and request
/// tracing outermost.
pub fn proxy_app(
    bot_client: Arc<dyn BotStatusClient>,
    air_client: Arc<dyn AirQualityClient>,
    cors: &CorsConfig,
) -> Router {
    Router::new()
        .merge(proxy::http::router())
        .merge(rest::router())
        .route("/health", get(health_check))
        .layer(Extension(bot_client))
        .layer(Extension(air_client))
        .layer(cors_layer(&cors.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Mock resource server: the eight resource paths, `/db` and `/health`.
pub fn mock_app(provider: Arc<MockProvider>, cors: &CorsConfig) -> Router {
    mock::server::router(provider)
        .route("/health", get(health_check))
        .layer(cors_layer(&cors.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
