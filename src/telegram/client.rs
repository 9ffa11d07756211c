//! Bot API HTTP client

use super::types::{ApiResponse, GetUpdates, Message, ParseMode, ReplyMarkup, SendMessage, Update};
use super::TransportError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Long-poll wait requested from `getUpdates`
pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// HTTP timeout; must outlast the long poll
const REQUEST_TIMEOUT: Duration = Duration::from_secs(LONG_POLL_TIMEOUT_SECS + 30);

/// Thin client over the Telegram Bot API
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str, api_url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Fetch pending updates, waiting up to `timeout_secs` for new ones
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, TransportError> {
        let body = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message"],
        };
        self.call_json("getUpdates", &body).await
    }

    pub async fn send_message(&self, request: &SendMessage<'_>) -> Result<Message, TransportError> {
        self.call_json("sendMessage", request).await
    }

    /// Upload a local photo with a caption
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: &Path,
        caption: &str,
        parse_mode: Option<ParseMode>,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<Message, TransportError> {
        let bytes = tokio::fs::read(photo)
            .await
            .map_err(|e| TransportError::api(format!("Cannot read photo {}: {e}", photo.display())))?;
        let file_name = photo
            .file_name()
            .map_or_else(|| "photo.jpg".to_string(), |n| n.to_string_lossy().into_owned());

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", Part::bytes(bytes).file_name(file_name));
        if let Some(mode) = parse_mode {
            form = form.text("parse_mode", mode.as_str());
        }
        if let Some(markup) = reply_markup {
            let markup = serde_json::to_string(markup)
                .map_err(|e| TransportError::decode(format!("Cannot encode reply markup: {e}")))?;
            form = form.text("reply_markup", markup);
        }

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn call_json<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Unwrap the `{ ok, result }` envelope; the Bot API reports errors in the body
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        let status = response.status();
        let text = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            TransportError::decode(format!("Unexpected response (HTTP {status}): {e}"))
        })?;
        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, TransportError> {
    match envelope {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse { ok: true, .. } => Err(TransportError::decode("Response has no result")),
        ApiResponse {
            description,
            error_code,
            parameters,
            ..
        } => Err(TransportError::from_api_error(
            error_code,
            description.as_deref(),
            parameters.and_then(|p| p.retry_after),
        )),
    }
}
