use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

use crate::mock::OverlayRule;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with RV_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub air: AirConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Proxy server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Proxy server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin.
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:5173"]` or `"http://localhost:5173,https://map.example.com"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Where the resource fetch client sends its requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourcesConfig {
    /// Base address prepended to every resource path (e.g. `/metro`).
    #[serde(default = "default_resources_base_url")]
    pub base_url: String,

    /// Optional request timeout in milliseconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Third-party bot status endpoint and its credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Upstream status endpoint queried by `GET /api/bot-status`.
    #[serde(default = "default_bot_status_url")]
    pub status_url: String,

    /// Bot identifier sent as the `bot_id` query parameter (required by the proxy).
    #[serde(default)]
    pub bot_id: String,

    /// Bearer token for the upstream API (required by the proxy, no compiled-in default).
    #[serde(default)]
    pub api_token: String,

    /// Upstream timeout in milliseconds.
    #[serde(default = "default_bot_timeout_ms")]
    pub timeout_ms: u64,
}

/// Air-quality upstream behind `GET /api/qweather/now`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirConfig {
    /// Scheme and host of the weather API; `/v7/air/now` is appended.
    #[serde(default = "default_air_api_host")]
    pub api_host: String,

    /// API key sent as the `key` query parameter. No compiled-in default.
    #[serde(default)]
    pub api_key: String,

    /// Location id used when the request names none.
    #[serde(default = "default_air_location")]
    pub default_location: String,

    #[serde(default = "default_air_timeout_ms")]
    pub timeout_ms: u64,
}

/// Mock resource server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    #[serde(default = "default_mock_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Directory holding `metro.json`, `bus.json`, `route1.json` ... `landmark3.json`.
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: String,

    /// Seed for the overlay generators. Unset draws a fresh seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Field-level faking rules applied on every response.
    #[serde(default)]
    pub overlays: Vec<OverlayRule>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    3000
}

#[allow(clippy::missing_const_for_fn)]
fn default_mock_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    // Default to empty (no cross-origin requests allowed)
    // Configure explicitly via RV_CORS__ALLOWED_ORIGINS or config.yaml
    vec![]
}

fn default_resources_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_bot_status_url() -> String {
    crate::proxy::DEFAULT_STATUS_URL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_bot_timeout_ms() -> u64 {
    5_000
}

fn default_air_api_host() -> String {
    crate::proxy::DEFAULT_AIR_API_HOST.to_string()
}

fn default_air_location() -> String {
    crate::proxy::DEFAULT_AIR_LOCATION.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_air_timeout_ms() -> u64 {
    10_000
}

fn default_fixtures_dir() -> String {
    "fixtures".to_string()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            base_url: default_resources_base_url(),
            timeout_ms: None,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            status_url: default_bot_status_url(),
            bot_id: String::new(),
            api_token: String::new(),
            timeout_ms: default_bot_timeout_ms(),
        }
    }
}

impl Default for AirConfig {
    fn default() -> Self {
        Self {
            api_host: default_air_api_host(),
            api_key: String::new(),
            default_location: default_air_location(),
            timeout_ms: default_air_timeout_ms(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: default_mock_port(),
            host: default_host(),
            fixtures_dir: default_fixtures_dir(),
            seed: None,
            overlays: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            cors: CorsConfig::default(),
            resources: ResourcesConfig::default(),
            bot: BotConfig::default(),
            air: AirConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl BotConfig {
    /// Check the credentials the status proxy cannot run without.
    ///
    /// Kept separate from [`Config::validate`] so the mock server and the
    /// fetch CLI can start without bot credentials.
    ///
    /// # Errors
    /// Returns an error if the bot id or API token is missing.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.bot_id.is_empty() {
            return Err(ConfigError::Validation(
                "bot.bot_id is required. Set RV_BOT__BOT_ID environment variable or configure in config.yaml.".into(),
            ));
        }

        if self.api_token.is_empty() {
            return Err(ConfigError::Validation(
                "bot.api_token is required. Set RV_BOT__API_TOKEN environment variable or configure in config.yaml.".into(),
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with RV_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("RV_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        if self.mock.port == 0 {
            return Err(ConfigError::Validation("mock.port cannot be 0".into()));
        }

        if !is_http_url(&self.resources.base_url) {
            return Err(ConfigError::Validation(format!(
                "resources.base_url must start with http:// or https://, got: '{}'",
                self.resources.base_url
            )));
        }

        if self.resources.timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "resources.timeout_ms cannot be 0".into(),
            ));
        }

        if !is_http_url(&self.bot.status_url) {
            return Err(ConfigError::Validation(format!(
                "bot.status_url must start with http:// or https://, got: '{}'",
                self.bot.status_url
            )));
        }

        if self.bot.timeout_ms == 0 {
            return Err(ConfigError::Validation("bot.timeout_ms cannot be 0".into()));
        }

        if !is_http_url(&self.air.api_host) {
            return Err(ConfigError::Validation(format!(
                "air.api_host must start with http:// or https://, got: '{}'",
                self.air.api_host
            )));
        }

        if self.air.timeout_ms == 0 {
            return Err(ConfigError::Validation("air.timeout_ms cannot be 0".into()));
        }

        if self.air.default_location.trim().is_empty() {
            return Err(ConfigError::Validation(
                "air.default_location cannot be empty".into(),
            ));
        }

        if self.mock.fixtures_dir.is_empty() {
            return Err(ConfigError::Validation(
                "mock.fixtures_dir cannot be empty".into(),
            ));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !is_http_url(origin) {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}
