//! Transport error types

use std::time::Duration;
use thiserror::Error;

/// Bot API error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    pub retry_after: Option<Duration>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retry_after: None,
        }
    }

    #[must_use]
    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::RateLimit, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Api, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    /// Classify an `ok: false` response
    pub fn from_api_error(error_code: Option<i32>, description: Option<&str>, retry_after: Option<u64>) -> Self {
        let description = description.unwrap_or("no description");
        match error_code {
            Some(429) => {
                let err = Self::rate_limit(format!("Rate limited: {description}"));
                match retry_after {
                    Some(secs) => err.with_retry_after(Duration::from_secs(secs)),
                    None => err,
                }
            }
            Some(code) if code >= 500 => Self::network(format!("Server error {code}: {description}")),
            Some(code) => Self::api(format!("Bot API error {code}: {description}")),
            None => Self::api(format!("Bot API error: {description}")),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the bot token
        let err = err.without_url();
        if err.is_decode() {
            Self::decode(format!("Failed to decode response: {err}"))
        } else {
            Self::network(format!("Request failed: {err}"))
        }
    }
}

/// Error classification for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection failures, timeouts, 5xx - retryable
    Network,
    /// Too many requests (429) - retryable after `retry_after`
    RateLimit,
    /// Request rejected by the Bot API (bad markup, blocked bot, ...)
    Api,
    /// Response body did not match the expected shape
    Decode,
}

impl TransportErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit)
    }
}
