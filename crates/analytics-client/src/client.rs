//! Reqwest-backed analytics source.
//!
//! The source owns transport details only: the session header, timeout and
//! HTTP status mapping, and JSON decoding of the response envelope.

use std::num::FpCategory;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::snapshot::AnalyticsData;

/// Header carrying the member session token.
pub const SESSION_TOKEN_HEADER: &str = "X-Vulnetix";

const ANALYTICS_PATH: &str = "analytics";

/// Errors raised while fetching the analytics document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsSourceError {
    /// The request could not be completed.
    #[error("analytics transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// The request or upstream processing timed out.
    #[error("analytics request timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The response body was not a valid analytics envelope.
    #[error("analytics response could not be decoded: {message}")]
    Decode {
        /// Decoder failure detail.
        message: String,
    },
}

impl AnalyticsSourceError {
    /// Build a [`AnalyticsSourceError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`AnalyticsSourceError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build a [`AnalyticsSourceError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// The `/analytics` response envelope.
///
/// Fields stay untyped so an unexpected shape in one of them never discards
/// the rest of the response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyticsEnvelope {
    /// Success flag.
    #[serde(default)]
    pub ok: Option<Value>,
    /// Aggregates, present on success.
    #[serde(default)]
    pub data: Option<Value>,
    /// Failure detail, normally `{ "message": ... }`.
    #[serde(default)]
    pub error: Option<Value>,
}

impl AnalyticsEnvelope {
    /// The failure message, if `error.message` is present and truthy.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let message = self.error.as_ref()?.get("message")?;
        if !is_truthy(message) {
            return None;
        }
        Some(
            message
                .as_str()
                .map_or_else(|| message.to_string(), ToOwned::to_owned),
        )
    }

    /// The aggregates, when both `ok` and `data` are truthy.
    #[must_use]
    pub fn accepted_data(&self) -> Option<AnalyticsData> {
        let ok = self.ok.as_ref().is_some_and(is_truthy);
        let data = self.data.as_ref().filter(|data| is_truthy(data))?;
        ok.then(|| AnalyticsData::from_value(data))
    }
}

/// JSON truthiness as the analytics backend's clients judge it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|n| !matches!(n.classify(), FpCategory::Zero | FpCategory::Nan)),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Port fetching the analytics envelope for one session.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Issue one authenticated read of the analytics document.
    async fn fetch(&self, session_token: &str) -> Result<AnalyticsEnvelope, AnalyticsSourceError>;
}

/// Analytics source performing `GET {base_url}/analytics`.
pub struct HttpAnalyticsSource {
    client: Client,
    endpoint: Url,
}

impl HttpAnalyticsSource {
    /// Build a source using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// endpoint cannot be derived from `base_url`.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, AnalyticsSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            client,
            endpoint: analytics_endpoint(base_url)?,
        })
    }
}

/// Resolve the analytics path below `base_url`, keeping any path prefix.
fn analytics_endpoint(base_url: &Url) -> Result<Url, AnalyticsSourceError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ANALYTICS_PATH)
        .map_err(|err| AnalyticsSourceError::transport(format!("invalid base url: {err}")))
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsSource {
    async fn fetch(&self, session_token: &str) -> Result<AnalyticsEnvelope, AnalyticsSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(SESSION_TOKEN_HEADER, session_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_envelope(body.as_ref())
    }
}

fn parse_envelope(body: &[u8]) -> Result<AnalyticsEnvelope, AnalyticsSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        AnalyticsSourceError::decode(format!("invalid analytics JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> AnalyticsSourceError {
    if error.is_timeout() {
        AnalyticsSourceError::timeout(error.to_string())
    } else {
        AnalyticsSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AnalyticsSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AnalyticsSourceError::timeout(message)
        }
        _ => AnalyticsSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
