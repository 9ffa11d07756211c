//! Trait abstractions for outbound delivery
//!
//! The dispatcher talks to a [`Presenter`], so it can be tested against a
//! recording mock instead of the Bot API.

use crate::caption::Caption;
use crate::messages::BUY_BUTTON_LABEL;
use crate::navigation::Keyboard;
use crate::session::ChatId;
use crate::telegram::types::{ParseMode, ReplyMarkup, SendMessage};
use crate::telegram::{TelegramClient, TransportError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A single outbound send failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for DeliveryError {
    fn from(err: TransportError) -> Self {
        Self::new(err.to_string())
    }
}

/// Outbound side of the bot
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Send menu copy, optionally replacing the reply keyboard
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<(), DeliveryError>;

    /// Send one product card with a purchase button
    async fn send_product_card(
        &self,
        chat: ChatId,
        photo: Option<&Path>,
        caption: &Caption,
        purchase_url: &str,
    ) -> Result<(), DeliveryError>;

    /// Send a text-only card with no markup at all
    async fn send_plain_fallback(&self, chat: ChatId, text: &str, purchase_url: &str) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<(), DeliveryError> {
        (**self).send_menu(chat, text, keyboard).await
    }

    async fn send_product_card(
        &self,
        chat: ChatId,
        photo: Option<&Path>,
        caption: &Caption,
        purchase_url: &str,
    ) -> Result<(), DeliveryError> {
        (**self).send_product_card(chat, photo, caption, purchase_url).await
    }

    async fn send_plain_fallback(&self, chat: ChatId, text: &str, purchase_url: &str) -> Result<(), DeliveryError> {
        (**self).send_plain_fallback(chat, text, purchase_url).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Presenter backed by the Bot API
pub struct TelegramPresenter {
    client: Arc<TelegramClient>,
}

impl TelegramPresenter {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

fn caption_parse_mode(caption: &Caption) -> Option<ParseMode> {
    caption.is_rich().then_some(ParseMode::MarkdownV2)
}

#[async_trait]
impl Presenter for TelegramPresenter {
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<(), DeliveryError> {
        let request = SendMessage {
            chat_id: chat,
            text,
            parse_mode: Some(ParseMode::Markdown),
            reply_markup: keyboard.map(ReplyMarkup::from),
        };
        self.client.send_message(&request).await?;
        Ok(())
    }

    async fn send_product_card(
        &self,
        chat: ChatId,
        photo: Option<&Path>,
        caption: &Caption,
        purchase_url: &str,
    ) -> Result<(), DeliveryError> {
        let markup = ReplyMarkup::link_button(BUY_BUTTON_LABEL, purchase_url);
        let parse_mode = caption_parse_mode(caption);

        match photo {
            Some(path) => {
                self.client
                    .send_photo(chat, path, &caption.text, parse_mode, Some(&markup))
                    .await?;
            }
            None => {
                let request = SendMessage {
                    chat_id: chat,
                    text: &caption.text,
                    parse_mode,
                    reply_markup: Some(markup),
                };
                self.client.send_message(&request).await?;
            }
        }
        Ok(())
    }

    async fn send_plain_fallback(&self, chat: ChatId, text: &str, purchase_url: &str) -> Result<(), DeliveryError> {
        let request = SendMessage {
            chat_id: chat,
            text,
            parse_mode: None,
            reply_markup: Some(ReplyMarkup::link_button(BUY_BUTTON_LABEL, purchase_url)),
        };
        self.client.send_message(&request).await?;
        Ok(())
    }
}
