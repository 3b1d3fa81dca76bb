//! Outbound client for the third-party bot status API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

use crate::config::BotConfig;

/// Upstream endpoint reporting whether a bot is online.
pub const DEFAULT_STATUS_URL: &str = "https://api.coze.cn/v1/bot/get_online_info";

/// Errors that can occur when querying the bot status API.
#[derive(Debug, Error)]
pub enum BotStatusError {
    /// HTTP request failed (connection, timeout, undecodable body)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Request failed with status code {status}")]
    Upstream { status: u16, body: Value },
}

impl BotStatusError {
    /// Upstream HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }

    /// What to report to the caller: the upstream body when there is one,
    /// the error message otherwise. Never `null`.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Upstream { body, .. } if !body.is_null() => body.clone(),
            _ => Value::String(self.to_string()),
        }
    }
}

/// Trait for bot status lookups.
///
/// Use `HttpBotStatusClient` for real HTTP calls, or `mock::MockBotStatusClient`
/// in tests.
#[async_trait]
pub trait BotStatusClient: Send + Sync {
    /// Fetch the status document for the configured bot.
    async fn bot_status(&self) -> Result<Value, BotStatusError>;
}

/// HTTP-based implementation of `BotStatusClient`.
pub struct HttpBotStatusClient {
    client: reqwest::Client,
    status_url: String,
    bot_id: String,
    api_token: String,
}

impl HttpBotStatusClient {
    /// Build a client from the `bot` configuration section, applying its timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &BotConfig) -> Result<Self, BotStatusError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self::with_client(
            client,
            config.status_url.clone(),
            config.bot_id.clone(),
            config.api_token.clone(),
        ))
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        status_url: impl Into<String>,
        bot_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            status_url: status_url.into(),
            bot_id: bot_id.into(),
            api_token: api_token.into(),
        }
    }
}

#[async_trait]
impl BotStatusClient for HttpBotStatusClient {
    async fn bot_status(&self) -> Result<Value, BotStatusError> {
        let response = self
            .client
            .get(&self.status_url)
            .query(&[("bot_id", self.bot_id.as_str())])
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .header(CONTENT_TYPE, "application/json")
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
            return Err(BotStatusError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
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

    use super::{BotStatusClient, BotStatusError, Value};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `BotStatusClient`.
    ///
    /// Returns the configured result once, then an upstream 503.
    pub struct MockBotStatusClient {
        result: Mutex<Option<Result<Value, BotStatusError>>>,
        calls: Mutex<usize>,
    }

    impl MockBotStatusClient {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(0),
            }
        }

        pub fn with_result(result: Result<Value, BotStatusError>) -> Self {
            let mock = Self::new();
            mock.set_result(result);
            mock
        }

        pub fn set_result(&self, result: Result<Value, BotStatusError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        pub fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl Default for MockBotStatusClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl BotStatusClient for MockBotStatusClient {
        async fn bot_status(&self) -> Result<Value, BotStatusError> {
            *self.calls.lock().unwrap() += 1;

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(BotStatusError::Upstream {
                    status: 503,
                    body: Value::Null,
                }))
        }
    }
}
