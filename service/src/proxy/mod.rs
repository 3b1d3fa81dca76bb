//! Upstream proxies: bot status/chat and air quality.
//!
//! `GET /api/bot-status` forwards to the third-party bot API with the
//! configured bearer token and `bot_id`, under a fixed timeout, and relays
//! the upstream body. Failures become a uniform 500 envelope.
//!
//! `GET /api/qweather/now[/{location}]` fetches current air-quality readings
//! and stamps them with the fetch time. Failures become a 500 carrying the
//! error text and placeholder readings.
//!
//! - [`BotStatusClient`] / [`AirQualityClient`] - Traits for the outbound lookups
//! - [`HttpBotStatusClient`] / [`HttpAirQualityClient`] - reqwest implementations
//! - [`mock`] - Mocks for unit tests (behind `test-utils` feature)

mod air;
mod bot;
pub mod http;

pub use air::{
    AirQualityClient, AirQualityError, HttpAirQualityClient, DEFAULT_AIR_API_HOST,
    DEFAULT_AIR_LOCATION,
};
pub use bot::{BotStatusClient, BotStatusError, HttpBotStatusClient, DEFAULT_STATUS_URL};
pub use http::{AirQualityFailure, AirQualityReport, ErrorEnvelope, STATUS_FAILURE_MESSAGE};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    pub use super::air::mock::MockAirQualityClient;
    pub use super::bot::mock::MockBotStatusClient;
}
