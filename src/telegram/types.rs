//! Bot API wire types
//!
//! Only the fields this bot reads or writes are modelled.

use crate::navigation::Keyboard;
use serde::{Deserialize, Serialize};

// ============================================================================
// Inbound
// ============================================================================

/// Envelope around every Bot API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    pub retry_after: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Chat and text of a plain text message, if this update is one
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        Some((message.chat.id, message.text.as_deref()?))
    }
}

// ============================================================================
// Outbound
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::MarkdownV2 => "MarkdownV2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
        one_time_keyboard: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        input_field_placeholder: Option<String>,
    },
    Remove {
        remove_keyboard: bool,
    },
    Inline {
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
}

impl ReplyMarkup {
    /// Single call-to-action button linking to `url`
    pub fn link_button(text: &str, url: &str) -> Self {
        ReplyMarkup::Inline {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: text.to_string(),
                url: url.to_string(),
            }]],
        }
    }
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        match keyboard {
            Keyboard::Reply { rows, placeholder } => ReplyMarkup::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| row.iter().map(|text| KeyboardButton { text: text.clone() }).collect())
                    .collect(),
                resize_keyboard: true,
                one_time_keyboard: false,
                input_field_placeholder: placeholder.clone(),
            },
            Keyboard::Remove => ReplyMarkup::Remove {
                remove_keyboard: true,
            },
        }
    }
}

/// `sendMessage` request body
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// `getUpdates` request body
#[derive(Debug, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}
