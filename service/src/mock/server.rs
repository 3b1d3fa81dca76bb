//! HTTP routes for the mock resource server.

use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use super::MockProvider;
use crate::catalog::Resource;

/// Resource routes (`/metro`, `/bus`, `/route1..3`, `/dibiao1..3`) plus `/db`
/// for the whole aggregate.
pub fn router(provider: Arc<MockProvider>) -> Router {
    let mut app = Router::new().route("/db", get(aggregate));

    for resource in Resource::ALL {
        app = app.route(
            resource.path(),
            get(move |Extension(provider): Extension<Arc<MockProvider>>| async move {
                tracing::debug!(%resource, "serving mock resource");
                Json(provider.build_resource(resource))
            }),
        );
    }

    app.layer(Extension(provider))
}

async fn aggregate(Extension(provider): Extension<Arc<MockProvider>>) -> impl IntoResponse {
    Json(provider.build_mock_response())
}
