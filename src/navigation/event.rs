//! Inputs that drive navigation

use super::menu::MenuTree;
use super::state::{CategoryId, PlatformId};
use crate::catalog::ProductRecord;

/// Classified input to the transition function
///
/// User inputs come from [`Input::classify`]; catalog inputs are fed back by
/// the dispatcher after it executes a `LoadCatalog` effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    // User inputs
    Start,
    Back,
    /// A platform that has categories
    Platform(PlatformId),
    Category(CategoryId),
    ShowMore,
    /// A platform without categories yet
    ComingSoon(PlatformId),
    Unknown(String),

    // Catalog inputs
    CatalogLoaded {
        category: CategoryId,
        products: Vec<ProductRecord>,
    },
    CatalogFailed {
        category: CategoryId,
    },
}

impl Input {
    /// Map a button label to an input by exact match.
    ///
    /// Priority: start command, back, browsable platform, category,
    /// show more, any other platform, unknown.
    pub fn classify(label: &str, tree: &MenuTree) -> Self {
        if tree.is_start_command(label) {
            return Input::Start;
        }
        if label == tree.back_label() {
            return Input::Back;
        }
        if let Some(platform) = tree.platform_by_label(label).filter(|p| p.has_categories) {
            return Input::Platform(platform.id.clone());
        }
        if let Some(category) = tree.category_by_label(label) {
            return Input::Category(category.id.clone());
        }
        if label == tree.show_more_label() {
            return Input::ShowMore;
        }
        if let Some(platform) = tree.platform_by_label(label) {
            return Input::ComingSoon(platform.id.clone());
        }
        Input::Unknown(label.to_string())
    }
}
