//! Runtime: turning inbound messages into outbound sends
//!
//! The dispatcher owns the effect loop, the poller feeds it, and the
//! presenter is the seam to the Bot API.

mod dispatcher;
pub mod poller;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use dispatcher::Dispatcher;
pub use traits::*;

use crate::catalog::JsonFileCatalog;

/// Type alias for the production dispatcher with concrete implementations
pub type ProductionDispatcher = Dispatcher<JsonFileCatalog, TelegramPresenter>;
