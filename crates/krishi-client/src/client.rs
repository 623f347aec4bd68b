//! HTTP client for the krishi backend.
//!
//! Wraps `reqwest` with endpoint-aware error mapping: non-2xx statuses become
//! [`ClientError::UnexpectedStatus`], and a top-level `"error"` string inside a
//! 200 body becomes [`ClientError::Domain`]. Endpoint methods live in
//! `diagnosis`, `stores` and `chat`.

use std::time::Duration;

use krishi_core::AppConfig;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Characters left unescaped in query values, matching `encodeURIComponent`.
/// Spaces become `%20`, never `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the diagnosis/store backend.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`BackendClient::from_config`] in the app or [`BackendClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct BackendClient {
    pub(crate) client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if the configured URL is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::build(
            &config.backend_url,
            config.request_timeout(),
            config.connect_timeout(),
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL and no request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::build(base_url, None, Duration::from_secs(10), "krishi-test/0.1")
    }

    /// Creates a client with a custom base URL and an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::with_base_url`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Self::build(base_url, Some(timeout), Duration::from_secs(10), "krishi-test/0.1")
    }

    fn build(
        base_url: &str,
        timeout: Option<Duration>,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let trimmed = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// Builds `<base>/<path>?k=v&...` with each value escaped by
    /// [`QUERY_VALUE`] (`Leaf Blight` → `Leaf%20Blight`).
    pub(crate) fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_VALUE));
        }
        url
    }

    /// Sends a GET and returns the checked JSON body.
    pub(crate) async fn get_json(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(endpoint, url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read_json(endpoint, response).await
    }

    /// Asserts a 2xx status, parses the body as JSON, and surfaces a
    /// top-level `"error"` string as [`ClientError::Domain`].
    pub(crate) async fn read_json(
        endpoint: &'static str,
        response: Response,
    ) -> Result<serde_json::Value, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .as_ref()
                .and_then(error_field)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_owned);
            tracing::warn!(endpoint, status = status.as_u16(), ?message, "backend returned error status");
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
                message,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: endpoint.to_string(),
                source: e,
            })?;

        if let Some(message) = error_field(&value) {
            return Err(ClientError::Domain {
                endpoint,
                message: message.to_owned(),
            });
        }

        Ok(value)
    }

    pub(crate) fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        value: serde_json::Value,
    ) -> Result<T, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }
}

/// The body's top-level `"error"` string, if any. An empty string still
/// counts as an error.
fn error_field(value: &serde_json::Value) -> Option<&str> {
    value.get("error").and_then(serde_json::Value::as_str)
}

/// Returns `Some(trimmed)` for non-blank text.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
