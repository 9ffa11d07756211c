//! Pure navigation transition function
//!
//! Every user input is accepted from every node, so the observable menu
//! flow matches plain label routing; the node only decides where "show more"
//! and category selections land.

use super::state::{CategoryId, PlatformId};
use super::{Effect, Input, MenuNode, MenuTree};
use crate::catalog::MAX_LISTED_PRODUCTS;

/// Result of a navigation transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub next: MenuNode,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(next: MenuNode) -> Self {
        Self {
            next,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same node, input and tree it always produces the same result,
/// with no I/O.
pub fn transition(node: &MenuNode, input: Input, tree: &MenuTree) -> TransitionResult {
    match (node, input) {
        // ============================================================
        // Root
        // ============================================================
        (_, Input::Start | Input::Back) => root_menu(tree),

        // ============================================================
        // Platforms
        // ============================================================
        (_, Input::Platform(platform)) => platform_menu(platform, tree),

        (node, Input::ShowMore) => match browsable_platform(node, tree) {
            Some(platform) => platform_menu(platform, tree),
            None => root_menu(tree),
        },

        (_, Input::ComingSoon(platform)) => {
            let label = tree
                .platform(&platform)
                .map(|p| p.label.clone())
                .unwrap_or_else(|| platform.to_string());
            TransitionResult::new(MenuNode::platform(platform.clone())).with_effect(
                Effect::ShowComingSoon {
                    platform,
                    label,
                    keyboard: tree.coming_soon_keyboard(),
                },
            )
        }

        // ============================================================
        // Categories
        // ============================================================
        (node, Input::Category(category)) => match browsable_platform(node, tree) {
            Some(platform) => TransitionResult::new(MenuNode::category(platform, category.clone()))
                .with_effect(Effect::load_catalog(category)),
            None => root_menu(tree),
        },

        (node, Input::CatalogLoaded { category, mut products }) => {
            if products.is_empty() {
                return TransitionResult::new(node.clone()).with_effect(Effect::ShowEmpty {
                    category,
                    keyboard: tree.empty_category_keyboard(),
                });
            }
            products.truncate(MAX_LISTED_PRODUCTS);
            TransitionResult::new(node.clone()).with_effect(Effect::ShowProducts {
                category,
                products,
                keyboard: tree.product_list_keyboard(),
            })
        }

        (node, Input::CatalogFailed { category: _ }) => {
            TransitionResult::new(node.parent()).with_effect(Effect::ShowTemporaryError)
        }

        // ============================================================
        // Unknown labels
        // ============================================================
        (node, Input::Unknown(_)) => {
            TransitionResult::new(node.clone()).with_effect(Effect::ShowGuidance)
        }
    }
}

fn root_menu(tree: &MenuTree) -> TransitionResult {
    TransitionResult::new(MenuNode::Root)
        .with_effect(Effect::show_menu(MenuNode::Root, tree.root_keyboard()))
}

fn platform_menu(platform: PlatformId, tree: &MenuTree) -> TransitionResult {
    let node = MenuNode::platform(platform);
    TransitionResult::new(node.clone()).with_effect(Effect::show_menu(node, tree.platform_keyboard()))
}

/// The platform the user is browsing, or the default browsable one
fn browsable_platform(node: &MenuNode, tree: &MenuTree) -> Option<PlatformId> {
    node.platform_id()
        .filter(|id| tree.supports_categories(id))
        .cloned()
        .or_else(|| tree.default_platform().map(|p| p.id.clone()))
}

/// Category currently on screen, if any
pub fn current_category(node: &MenuNode) -> Option<&CategoryId> {
    match node {
        MenuNode::Category { category, .. } => Some(category),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;
    use crate::navigation::Keyboard;

    fn tree() -> MenuTree {
        MenuTree::storefront().unwrap()
    }

    fn amazon() -> PlatformId {
        PlatformId::new("amazon")
    }

    fn beauty() -> CategoryId {
        CategoryId::new("beauty")
    }

    fn product(id: &str) -> ProductRecord {
        ProductRecord::new(id, &format!("Product {id}"), beauty(), 10.0, "https://example.com/p")
    }

    #[test]
    fn test_start_shows_root_menu_with_platforms() {
        let tree = tree();
        let result = transition(&MenuNode::Root, Input::Start, &tree);

        assert_eq!(result.next, MenuNode::Root);
        assert_eq!(result.effects.len(), 1);
        let Effect::ShowMenu { node, keyboard } = &result.effects[0] else {
            panic!("expected ShowMenu, got {:?}", result.effects[0]);
        };
        assert_eq!(node, &MenuNode::Root);
        assert_eq!(keyboard.labels(), vec!["⚡ علي إكس براس", "🛍️ تريندويل", "🚀 أمازون"]);
    }

    #[test]
    fn test_back_from_category_returns_to_root() {
        let result = transition(&MenuNode::category(amazon(), beauty()), Input::Back, &tree());
        assert_eq!(result.next, MenuNode::Root);
        assert!(matches!(result.effects[0], Effect::ShowMenu { node: MenuNode::Root, .. }));
    }

    #[test]
    fn test_platform_selection_shows_categories() {
        let tree = tree();
        let result = transition(&MenuNode::Root, Input::Platform(amazon()), &tree);

        assert_eq!(result.next, MenuNode::platform(amazon()));
        assert_eq!(
            result.effects,
            vec![Effect::show_menu(MenuNode::platform(amazon()), tree.platform_keyboard())]
        );
    }

    #[test]
    fn test_coming_soon_platform() {
        let tree = tree();
        let express = PlatformId::new("express");
        let result = transition(&MenuNode::Root, Input::ComingSoon(express.clone()), &tree);

        assert_eq!(
            result.effects,
            vec![Effect::ShowComingSoon {
                platform: express,
                label: "⚡ علي إكس براس".to_string(),
                keyboard: tree.coming_soon_keyboard(),
            }]
        );
    }

    #[test]
    fn test_category_from_stale_root_keyboard_uses_default_platform() {
        let result = transition(&MenuNode::Root, Input::Category(beauty()), &tree());

        assert_eq!(result.next, MenuNode::category(amazon(), beauty()));
        assert_eq!(result.effects, vec![Effect::load_catalog(beauty())]);
    }

    #[test]
    fn test_show_more_reenters_last_platform() {
        let tree = tree();
        let result = transition(&MenuNode::category(amazon(), beauty()), Input::ShowMore, &tree);

        assert_eq!(result.next, MenuNode::platform(amazon()));
        assert!(matches!(&result.effects[0], Effect::ShowMenu { keyboard, .. } if *keyboard == tree.platform_keyboard()));
    }

    #[test]
    fn test_show_more_from_coming_soon_leaf_uses_default_platform() {
        let node = MenuNode::platform(PlatformId::new("trendyol"));
        let result = transition(&node, Input::ShowMore, &tree());
        assert_eq!(result.next, MenuNode::platform(amazon()));
    }

    #[test]
    fn test_catalog_loaded_empty_shows_empty_effect() {
        let tree = tree();
        let node = MenuNode::category(amazon(), beauty());
        let result = transition(
            &node,
            Input::CatalogLoaded {
                category: beauty(),
                products: vec![],
            },
            &tree,
        );

        assert_eq!(result.next, node);
        assert_eq!(
            result.effects,
            vec![Effect::ShowEmpty {
                category: beauty(),
                keyboard: tree.empty_category_keyboard(),
            }]
        );
    }

    #[test]
    fn test_catalog_loaded_caps_at_three_in_source_order() {
        let products: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(product).collect();
        let result = transition(
            &MenuNode::category(amazon(), beauty()),
            Input::CatalogLoaded {
                category: beauty(),
                products,
            },
            &tree(),
        );

        let Effect::ShowProducts { products, keyboard, .. } = &result.effects[0] else {
            panic!("expected ShowProducts");
        };
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(keyboard.labels().len(), 2);
    }

    #[test]
    fn test_catalog_failure_falls_back_to_platform() {
        let result = transition(
            &MenuNode::category(amazon(), beauty()),
            Input::CatalogFailed { category: beauty() },
            &tree(),
        );

        assert_eq!(result.next, MenuNode::platform(amazon()));
        assert_eq!(result.effects, vec![Effect::ShowTemporaryError]);
    }

    #[test]
    fn test_unknown_label_keeps_node() {
        let node = MenuNode::platform(amazon());
        let result = transition(&node, Input::Unknown("hi".to_string()), &tree());

        assert_eq!(result.next, node);
        assert_eq!(result.effects, vec![Effect::ShowGuidance]);
    }

    #[test]
    fn test_empty_keyboard_offers_back() {
        let tree = tree();
        assert_eq!(tree.empty_category_keyboard().labels(), vec![tree.back_label()]);
        assert_ne!(tree.empty_category_keyboard(), Keyboard::Remove);
    }

    #[test]
    fn test_current_category() {
        assert_eq!(current_category(&MenuNode::category(amazon(), beauty())), Some(&beauty()));
        assert_eq!(current_category(&MenuNode::Root), None);
    }
}
