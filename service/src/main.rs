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
    app::proxy_app,
    config::Config,
    http::shutdown_signal,
    proxy::{AirQualityClient, BotStatusClient, HttpAirQualityClient, HttpBotStatusClient},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    config
        .bot
        .validate_credentials()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    init_tracing(&config.logging);

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "routeviz-api starting up"
    );

    let bot_client: Arc<dyn BotStatusClient> =
        Arc::new(HttpBotStatusClient::from_config(&config.bot)?);
    tracing::info!(
        status_url = %config.bot.status_url,
        timeout_ms = config.bot.timeout_ms,
        "bot status client configured"
    );

    if config.air.api_key.is_empty() {
        tracing::warn!("air.api_key is not set - /api/qweather lookups will be rejected upstream");
    }
    let air_client: Arc<dyn AirQualityClient> =
        Arc::new(HttpAirQualityClient::from_config(&config.air)?);

    let app = proxy_app(bot_client, air_client, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Status query: GET  http://{}/api/bot-status", addr);
    tracing::info!("Chat:         POST http://{}/api/chat", addr);
    tracing::info!("Air quality:  GET  http://{}/api/qweather/now", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
