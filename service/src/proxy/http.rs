//! HTTP handlers for the status, chat and air-quality proxies.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::air::AirQualityClient;
use super::bot::BotStatusClient;

/// Error message returned when the status lookup fails for any reason.
pub const STATUS_FAILURE_MESSAGE: &str = "状态查询失败";

/// Uniform error envelope returned by the proxy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: String,
    #[schema(value_type = Object)]
    pub details: Value,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }

    #[must_use]
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Current air-quality readings, stamped with the local time they were fetched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReport {
    #[schema(value_type = Object)]
    pub air: Value,
    pub location: String,
    /// `YYYY-MM-DD HH:MM:SS`, server local time.
    pub update_time: String,
}

/// Failure body: the error text plus placeholder readings the frontend can render.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AirQualityFailure {
    pub error: String,
    #[schema(value_type = Object)]
    pub air: Value,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/bot-status", get(bot_status))
        .route("/api/chat", post(chat))
        .route("/api/qweather/now", get(air_quality_default))
        .route("/api/qweather/now/{location}", get(air_quality))
}

/// Relay the bot's online status
///
/// Forwards to the upstream status API and returns its JSON body verbatim.
/// Any failure, whatever the upstream status, is reported as a 500 envelope.
#[utoipa::path(
    get,
    path = "/api/bot-status",
    tag = "Bot",
    responses(
        (status = 200, description = "Upstream status document, passed through verbatim"),
        (status = 500, description = "Status lookup failed", body = ErrorEnvelope)
    )
)]
pub async fn bot_status(Extension(client): Extension<Arc<dyn BotStatusClient>>) -> Response {
    match client.bot_status().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            let details = err.details();
            tracing::error!(
                status = ?err.status(),
                body = %details,
                error = %err,
                "{}",
                STATUS_FAILURE_MESSAGE
            );
            ErrorEnvelope::new(STATUS_FAILURE_MESSAGE, details)
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Chat with the bot (not implemented)
///
/// Declared for the frontend but without an upstream contract; always 501.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Bot",
    responses(
        (status = 501, description = "Chat is not implemented", body = ErrorEnvelope)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn chat() -> Response {
    ErrorEnvelope::new(
        "chat is not implemented",
        Value::String("POST /api/chat has no upstream contract".into()),
    )
    .into_response_with(StatusCode::NOT_IMPLEMENTED)
}

/// Current air quality at the default location
#[utoipa::path(
    get,
    path = "/api/qweather/now",
    tag = "Air",
    responses(
        (status = 200, description = "Current readings", body = AirQualityReport),
        (status = 500, description = "Lookup failed", body = AirQualityFailure)
    )
)]
pub async fn air_quality_default(
    Extension(client): Extension<Arc<dyn AirQualityClient>>,
) -> Response {
    let location = client.default_location().to_string();
    air_quality_response(client.as_ref(), location).await
}

/// Current air quality at a location
#[utoipa::path(
    get,
    path = "/api/qweather/now/{location}",
    tag = "Air",
    params(("location" = String, Path, description = "Location id, e.g. 101210113")),
    responses(
        (status = 200, description = "Current readings", body = AirQualityReport),
        (status = 500, description = "Lookup failed", body = AirQualityFailure)
    )
)]
pub async fn air_quality(
    Extension(client): Extension<Arc<dyn AirQualityClient>>,
    Path(location): Path<String>,
) -> Response {
    air_quality_response(client.as_ref(), location).await
}

async fn air_quality_response(client: &dyn AirQualityClient, location: String) -> Response {
    match client.air_now(&location).await {
        Ok(air) => Json(AirQualityReport {
            air,
            location,
            update_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(%location, error = %err, "air quality lookup failed");
            let failure = AirQualityFailure {
                error: err.to_string(),
                air: json!({"aqi": "--", "category": "无数据"}),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
        }
    }
}
