//! The single configured HTTP client used for every resource fetch.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::ResourcesConfig;

/// Errors produced by [`ClientFacade::request`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response (DNS, refused
    /// connection, timeout, undecodable 200 body).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200.
    #[error("server responded {status}: {body}")]
    Status { status: u16, body: Value },
}

impl ClientError {
    /// The error payload sent by the server, if the failure was a non-200 reply.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Transport(_) => None,
        }
    }
}

/// HTTP client with a fixed base address and a fixed unwrap rule.
///
/// A 200 reply resolves to its JSON body, any other status rejects with the
/// body, and transport failures reject with the underlying `reqwest` error.
/// Each call is exactly one round trip: nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct ClientFacade {
    client: reqwest::Client,
    base_url: String,
}

impl ClientFacade {
    /// Create a facade using the transport's default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a facade with a custom `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a facade from the `resources` configuration section.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ResourcesConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self::with_client(builder.build()?, config.base_url.clone()))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `method` to `base_url + path` and unwrap the reply.
    ///
    /// # Errors
    /// [`ClientError::Status`] for any non-200 reply, carrying the reply body;
    /// [`ClientError::Transport`] when the request itself fails.
    pub async fn request(&self, path: &str, method: Method) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending resource request");

        let response = self.client.request(method, &url).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(response.json().await?);
        }

        let bytes = response.bytes().await?;
        let body = error_body(&bytes);
        tracing::debug!(status = status.as_u16(), %url, "resource request rejected");

        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Interpret a rejected reply's body: JSON when it parses, the raw text otherwise.
fn error_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_prefers_json() {
        assert_eq!(
            error_body(br#"{"msg":"missing"}"#),
            json!({"msg": "missing"})
        );
    }

    #[test]
    fn error_body_keeps_plain_text() {
        assert_eq!(error_body(b"Not Found"), json!("Not Found"));
    }

    #[test]
    fn error_body_empty_is_null() {
        assert_eq!(error_body(b""), Value::Null);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let facade = ClientFacade::new("http://localhost:8080/");
        assert_eq!(facade.base_url(), "http://localhost:8080");
    }

    #[test]
    fn status_error_exposes_body() {
        let err = ClientError::Status {
            status: 503,
            body: json!({"error": "down"}),
        };
        assert_eq!(err.body(), Some(&json!({"error": "down"})));
        assert!(err.to_string().contains("503"));
    }
}
