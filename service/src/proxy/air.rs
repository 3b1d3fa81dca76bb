//! Outbound client for the real-time air-quality API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::AirConfig;

pub const DEFAULT_AIR_API_HOST: &str = "https://devapi.qweather.com";

/// Gongshu district, Hangzhou.
pub const DEFAULT_AIR_LOCATION: &str = "101210113";

const AIR_NOW_PATH: &str = "/v7/air/now";

/// The API reports its own status in a string `code` field.
const API_OK: &str = "200";

#[derive(Debug, Error)]
pub enum AirQualityError {
    /// HTTP request failed (connection, timeout, undecodable body)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success HTTP status
    #[error("Request failed with status code {status}")]
    Upstream { status: u16, body: Value },

    /// Upstream answered, but with an error code in the body
    #[error("air quality API returned code {code}")]
    Api { code: String, body: Value },

    /// Upstream answered without a `now` section
    #[error("air quality response has no current readings")]
    Incomplete,
}

/// Trait for current air-quality lookups.
///
/// Use `HttpAirQualityClient` for real HTTP calls, or
/// `mock::MockAirQualityClient` in tests.
#[async_trait]
pub trait AirQualityClient: Send + Sync {
    /// Current readings (the upstream `now` object) for `location`.
    async fn air_now(&self, location: &str) -> Result<Value, AirQualityError>;

    /// Location queried when the caller names none.
    fn default_location(&self) -> &str;
}

/// HTTP-based implementation of `AirQualityClient`.
pub struct HttpAirQualityClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    default_location: String,
}

impl HttpAirQualityClient {
    /// Build a client from the `air` configuration section, applying its timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &AirConfig) -> Result<Self, AirQualityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self::with_client(
            client,
            &config.api_host,
            config.api_key.clone(),
            config.default_location.clone(),
        ))
    }

    pub fn with_client(
        client: reqwest::Client,
        api_host: &str,
        api_key: impl Into<String>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: format!("{}{AIR_NOW_PATH}", api_host.trim_end_matches('/')),
            api_key: api_key.into(),
            default_location: default_location.into(),
        }
    }
}

#[async_trait]
impl AirQualityClient for HttpAirQualityClient {
    async fn air_now(&self, location: &str) -> Result<Value, AirQualityError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("location", location), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };
            return Err(AirQualityError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        current_readings(response.json().await?)
    }

    fn default_location(&self) -> &str {
        &self.default_location
    }
}

/// Pull `now` out of an upstream document, rejecting error codes and empty readings.
fn current_readings(mut body: Value) -> Result<Value, AirQualityError> {
    if let Some(code) = body.get("code") {
        if code.as_str() != Some(API_OK) {
            let code = code.as_str().map_or_else(|| code.to_string(), str::to_string);
            return Err(AirQualityError::Api { code, body });
        }
    }

    match body.get_mut("now").map(Value::take) {
        Some(now) if !is_blank(&now) => Ok(now),
        _ => Err(AirQualityError::Incomplete),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
        Value::Number(_) => false,
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{AirQualityClient, AirQualityError, Value, DEFAULT_AIR_LOCATION};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `AirQualityClient`.
    ///
    /// Returns the configured result once, then `Incomplete`. Records every
    /// location asked for.
    pub struct MockAirQualityClient {
        result: Mutex<Option<Result<Value, AirQualityError>>>,
        locations: Mutex<Vec<String>>,
    }

    impl MockAirQualityClient {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                locations: Mutex::new(Vec::new()),
            }
        }

        pub fn with_result(result: Result<Value, AirQualityError>) -> Self {
            let mock = Self::new();
            *mock.result.lock().unwrap() = Some(result);
            mock
        }

        pub fn locations(&self) -> Vec<String> {
            self.locations.lock().unwrap().clone()
        }
    }

    impl Default for MockAirQualityClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl AirQualityClient for MockAirQualityClient {
        async fn air_now(&self, location: &str) -> Result<Value, AirQualityError> {
            self.locations.lock().unwrap().push(location.to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(AirQualityError::Incomplete))
        }

        fn default_location(&self) -> &str {
            DEFAULT_AIR_LOCATION
        }
    }
}
