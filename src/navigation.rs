//! Menu navigation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `(MenuNode, Input) -> (MenuNode, Vec<Effect>)`.

mod effect;
pub mod event;
pub mod menu;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Input;
pub use menu::{Keyboard, MenuTree};
pub use state::{CategoryId, MenuNode, PlatformId};
pub use transition::{current_category, transition};
