//! Effects produced by navigation transitions

use super::menu::Keyboard;
use super::state::{CategoryId, MenuNode, PlatformId};
use crate::catalog::ProductRecord;

/// Effects to be executed by the dispatcher after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Present the menu for a node
    ShowMenu { node: MenuNode, keyboard: Keyboard },

    /// Read the catalog; the dispatcher answers with a catalog input
    LoadCatalog { category: CategoryId },

    /// Render product cards, then the end-of-list menu
    ShowProducts {
        category: CategoryId,
        products: Vec<ProductRecord>,
        keyboard: Keyboard,
    },

    /// The category has no products right now
    ShowEmpty {
        category: CategoryId,
        keyboard: Keyboard,
    },

    /// Platform exists but is not browsable yet
    ShowComingSoon {
        platform: PlatformId,
        label: String,
        keyboard: Keyboard,
    },

    /// Generic "try again later"; the current keyboard stays
    ShowTemporaryError,

    /// Unrecognised label: point the user at the start command
    ShowGuidance,
}

impl Effect {
    pub fn show_menu(node: MenuNode, keyboard: Keyboard) -> Self {
        Effect::ShowMenu { node, keyboard }
    }

    pub fn load_catalog(category: CategoryId) -> Self {
        Effect::LoadCatalog { category }
    }

    /// Tag name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::ShowMenu { .. } => "show_menu",
            Effect::LoadCatalog { .. } => "load_catalog",
            Effect::ShowProducts { .. } => "show_products",
            Effect::ShowEmpty { .. } => "show_empty",
            Effect::ShowComingSoon { .. } => "show_coming_soon",
            Effect::ShowTemporaryError => "show_temporary_error",
            Effect::ShowGuidance => "show_guidance",
        }
    }
}
