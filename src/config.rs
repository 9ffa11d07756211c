//! Process configuration from environment variables

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_CATALOG_PATH: &str = "data/products.json";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "assets/placeholder.jpg";
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingToken,
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Bot configuration
#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Bot API base URL, without the `/bot<token>` suffix
    pub api_url: String,
    pub catalog_path: PathBuf,
    /// Shown when a product's own image is missing
    pub placeholder_image: PathBuf,
    pub session_idle_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = lookup("BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let session_idle_timeout = match lookup("SESSION_IDLE_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "SESSION_IDLE_SECS",
                    value,
                })?,
            None => Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        };

        Ok(Self {
            bot_token,
            api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            catalog_path: lookup("CATALOG_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from),
            placeholder_image: lookup("PLACEHOLDER_IMAGE")
                .map_or_else(|| PathBuf::from(DEFAULT_PLACEHOLDER_IMAGE), PathBuf::from),
            session_idle_timeout,
        })
    }
}

// Keep the token out of logs
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("catalog_path", &self.catalog_path)
            .field("placeholder_image", &self.placeholder_image)
            .field("session_idle_timeout", &self.session_idle_timeout)
            .finish()
    }
}
