//! Development resource server serving overlaid fixtures.
//!
//! Usage: `cargo run --bin mock_server` (reads `mock.*` from config.yaml / `RV_MOCK__*`).

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::{net::SocketAddr, sync::Arc};

use routeviz_api::{
    app::mock_app, config::Config, http::shutdown_signal, mock::MockProvider,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    init_tracing(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "routeviz mock server starting up"
    );

    // Fixtures are read once here; requests are served from memory
    let provider = Arc::new(MockProvider::from_config(&config.mock)?);
    let app = mock_app(provider, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.mock.host, config.mock.port).parse()?;
    tracing::info!("Serving mock resources at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
