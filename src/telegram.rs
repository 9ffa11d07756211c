//! Telegram Bot API transport
//!
//! Long polling in, `sendMessage` / `sendPhoto` out. Everything above
//! this module speaks in menus and captions, never in Bot API JSON.

mod client;
mod error;
pub mod types;

pub use client::{TelegramClient, LONG_POLL_TIMEOUT_SECS};
pub use error::{TransportError, TransportErrorKind};
