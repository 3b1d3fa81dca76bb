//! REST handlers for the static frontend data and `OpenAPI` documentation.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{extract::Path, http::StatusCode, response::Response, routing::get, Json, Router};
use serde_json::Value;
use utoipa::OpenApi;

use crate::metrics::{self, Metric, RouteMetrics, ROUTE_METRICS};
use crate::pages::{self, PageEntry, PAGES};
use crate::proxy::{self, AirQualityFailure, AirQualityReport, ErrorEnvelope};

/// `OpenAPI` documentation for the proxy server.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Routeviz API",
        version = "1.0.0",
        description = "Bot status and air-quality proxies plus route chart data for the route visualization frontend",
        license(name = "MIT")
    ),
    paths(
        proxy::http::bot_status,
        proxy::http::chat,
        proxy::http::air_quality_default,
        proxy::http::air_quality,
        list_route_charts,
        get_route_chart,
        list_pages,
        get_page
    ),
    components(schemas(
        ErrorEnvelope,
        AirQualityReport,
        AirQualityFailure,
        RouteMetrics,
        Metric,
        PageEntry
    ))
)]
pub struct ApiDoc;

pub fn router() -> Router {
    Router::new()
        .route("/api/route-charts", get(list_route_charts))
        .route("/api/route-charts/{route}", get(get_route_chart))
        .route("/api/pages", get(list_pages))
        .route("/api/pages/{name}", get(get_page))
}

/// List chart metrics for every recommended route
#[utoipa::path(
    get,
    path = "/api/route-charts",
    tag = "Routes",
    responses(
        (status = 200, description = "Metric tables for all routes", body = [RouteMetrics])
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_route_charts() -> Json<&'static [RouteMetrics]> {
    Json(ROUTE_METRICS.as_slice())
}

/// Get chart metrics for one route
///
/// # Errors
///
/// Returns a 404 envelope when the route is unknown.
#[utoipa::path(
    get,
    path = "/api/route-charts/{route}",
    tag = "Routes",
    params(("route" = String, Path, description = "Route key, e.g. route1")),
    responses(
        (status = 200, description = "Metric table", body = RouteMetrics),
        (status = 404, description = "Unknown route", body = ErrorEnvelope)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_route_chart(
    Path(route): Path<String>,
) -> Result<Json<&'static RouteMetrics>, Response> {
    metrics::route_metrics(&route).map(Json).ok_or_else(|| {
        ErrorEnvelope::new("unknown route", Value::String(route))
            .into_response_with(StatusCode::NOT_FOUND)
    })
}

/// List the frontend views
#[utoipa::path(
    get,
    path = "/api/pages",
    tag = "Pages",
    responses(
        (status = 200, description = "Page registry", body = [PageEntry])
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_pages() -> Json<&'static [PageEntry]> {
    Json(PAGES.as_slice())
}

/// Look up one frontend view
///
/// `name` is the view path without its leading slash, e.g. `routeplan`.
///
/// # Errors
///
/// Returns a 404 envelope when no view has that path.
#[utoipa::path(
    get,
    path = "/api/pages/{name}",
    tag = "Pages",
    params(("name" = String, Path, description = "View path without the leading slash, e.g. AI_search")),
    responses(
        (status = 200, description = "Page entry", body = PageEntry),
        (status = 404, description = "Unknown page", body = ErrorEnvelope)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_page(Path(name): Path<String>) -> Result<Json<&'static PageEntry>, Response> {
    pages::find_page(&format!("/{name}")).map(Json).ok_or_else(|| {
        ErrorEnvelope::new("unknown page", Value::String(name))
            .into_response_with(StatusCode::NOT_FOUND)
    })
}
