//! Meeting-bot API client utilities.
//!
//! This crate provides a lightweight client for the upstream bot-management
//! service. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving configuration from `MEETING_BOT_API_URL` / `MEETING_BOT_API_KEY`
//! - Attaching the `Token` authorization header when a key is configured
//! - Converting transport and status failures into typed errors
//!
//! The primary entry point is [`BotApiClient`]. Create an instance via
//! [`BotApiClient::new`] with an [`ApiConfig`], then issue calls through the
//! [`BotApi`] trait.
//!
//! # Example
//!
//! ```ignore
//! use huddle_api::{ApiConfig, BotApi, BotApiClient};
//! use reqwest::Method;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = BotApiClient::new(ApiConfig::from_env())?;
//! let bots = client.request(Method::GET, "/api/v1/bots", None).await?;
//! println!("{bots}");
//! # Ok(())
//! # }
//! ```

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Environment variable naming the upstream base URL.
pub const API_URL_ENV: &str = "MEETING_BOT_API_URL";
/// Environment variable holding the optional API token.
pub const API_KEY_ENV: &str = "MEETING_BOT_API_KEY";
/// Base URL used when `MEETING_BOT_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the upstream service.
///
/// Resolved once at process start and handed to [`BotApiClient::new`]; the
/// client never reads the environment after construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Absolute base URL of the bot-management service.
    pub base_url: String,
    /// Optional API token. `None` means unauthenticated mode, which the
    /// upstream accepts for local deployments.
    pub api_key: Option<String>,
}

impl ApiConfig {
    /// Resolve configuration from the environment.
    ///
    /// Falls back to [`DEFAULT_BASE_URL`] when the URL variable is unset and
    /// treats a blank API key the same as an absent one.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let api_key = env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty());
        Self { base_url, api_key }
    }
}

/// Failures raised by the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream answered with a non-success status. The body text is carried
    /// verbatim so callers can surface the upstream's own message.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    /// The request never produced a usable response (DNS, refused
    /// connection, timeout, or an unparseable success body).
    #[error("Network error: {0}")]
    Network(String),
}

/// One round trip to the upstream service.
///
/// The trait seam keeps the dispatch layer testable with an injected stub;
/// [`BotApiClient`] is the production implementation.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Issue a single request and return the parsed JSON body.
    ///
    /// Exactly one outbound call per invocation, no retries. An empty
    /// success body yields `Value::Null`.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
}

/// Thin wrapper around a configured `reqwest::Client` for bot-management
/// API access.
///
/// Default headers (JSON content type, optional `Token` authorization) are
/// applied at construction so every request carries them.
#[derive(Debug, Clone)]
pub struct BotApiClient {
    base_url: String,
    http: Client,
}

impl BotApiClient {
    /// Build a client from the given configuration.
    ///
    /// Fails when the base URL does not parse or the API key is not a valid
    /// header value.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = validate_base_url(&config.base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(api_key) = config.api_key.as_deref() {
            let authorization = format!("Token {}", api_key);
            default_headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&authorization).context("API key is not a valid header value")?,
            );
        }

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl BotApi for BotApiClient {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, has_body = body.is_some(), "sending bot api request");

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(body) = body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(%method, %url, %error, "bot api transport failure");
            ApiError::Network(error.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "bot api returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(%method, %url, status = status.as_u16(), "bot api request completed");
        parse_response_body(&text, status)
    }
}

/// Parse a success body, treating an empty body as `Value::Null`.
fn parse_response_body(text: &str, status: StatusCode) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|error| ApiError::Network(format!("invalid JSON in {status} response: {error}")))
}

/// Validate that a base URL is usable by the client.
///
/// The URL must parse and include a host; a trailing slash is dropped so
/// request paths can always start with `/`.
fn validate_base_url(base: &str) -> Result<String> {
    let parsed = Url::parse(base).map_err(|e| anyhow!("invalid {} value '{}': {}", API_URL_ENV, base, e))?;
    if parsed.host_str().is_none() {
        return Err(anyhow!("{} must include a host", API_URL_ENV));
    }
    Ok(base.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_local_default() {
        temp_env::with_vars([(API_URL_ENV, None::<&str>), (API_KEY_ENV, None)], || {
            let config = ApiConfig::from_env();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert!(config.api_key.is_none(), "no key in the environment means unauthenticated mode");
        });
    }

    #[test]
    fn from_env_reads_overrides() {
        temp_env::with_vars(
            [
                (API_URL_ENV, Some("https://bots.example.com")),
                (API_KEY_ENV, Some("tok_123")),
            ],
            || {
                let config = ApiConfig::from_env();
                assert_eq!(config.base_url, "https://bots.example.com");
                assert_eq!(config.api_key.as_deref(), Some("tok_123"));
            },
        );
    }

    #[test]
    fn from_env_ignores_blank_api_key() {
        temp_env::with_vars([(API_URL_ENV, None::<&str>), (API_KEY_ENV, Some("   "))], || {
            let config = ApiConfig::from_env();
            assert!(config.api_key.is_none(), "blank keys must not produce an auth header");
        });
    }

    #[test]
    fn validate_base_url_accepts_http_and_https() {
        assert_eq!(validate_base_url("http://localhost:8000").unwrap(), "http://localhost:8000");
        assert_eq!(
            validate_base_url("https://bots.example.com/").unwrap(),
            "https://bots.example.com",
            "trailing slash is trimmed so paths can start with '/'"
        );
    }

    #[test]
    fn validate_base_url_rejects_garbage() {
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("file:///tmp/socket").is_err(), "URLs without a host are rejected");
    }

    #[test]
    fn api_error_display_matches_envelope_wording() {
        let status = ApiError::Status {
            status: 404,
            body: "bot not found".into(),
        };
        assert_eq!(status.to_string(), "API error 404: bot not found");

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.to_string(), "Network error: connection refused");
    }

    #[test]
    fn parse_response_body_handles_empty_and_json() {
        assert_eq!(parse_response_body("", StatusCode::OK).unwrap(), Value::Null);
        assert_eq!(
            parse_response_body("{\"id\":\"bot_1\"}", StatusCode::OK).unwrap(),
            serde_json::json!({"id": "bot_1"})
        );
        assert!(parse_response_body("<html>", StatusCode::OK).is_err());
    }
}
