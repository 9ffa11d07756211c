//! Property-based tests for navigation
//!
//! These tests verify key invariants hold across all nodes and inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::catalog::{ProductRecord, MAX_LISTED_PRODUCTS};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn tree() -> MenuTree {
    MenuTree::storefront().unwrap()
}

/// Every label visible anywhere in the tree, plus a few strangers
fn all_labels() -> Vec<String> {
    let tree = tree();
    let mut labels: Vec<String> = tree
        .platforms()
        .iter()
        .map(|p| p.label.clone())
        .chain(tree.categories().iter().map(|c| c.label.clone()))
        .collect();
    labels.push(tree.back_label().to_string());
    labels.push(tree.show_more_label().to_string());
    labels.push("/start".to_string());
    labels.push("hello".to_string());
    labels.push(String::new());
    labels
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_label() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(all_labels()),
        1 => "\\PC{0,20}",
    ]
}

fn arb_platform() -> impl Strategy<Value = PlatformId> {
    proptest::sample::select(vec!["express", "trendyol", "amazon"]).prop_map(PlatformId::new)
}

fn arb_category() -> impl Strategy<Value = CategoryId> {
    proptest::sample::select(vec!["groceries", "beauty", "mobiles", "home_appliances"])
        .prop_map(CategoryId::new)
}

fn arb_node() -> impl Strategy<Value = MenuNode> {
    prop_oneof![
        Just(MenuNode::Root),
        arb_platform().prop_map(MenuNode::platform),
        arb_category().prop_map(|c| MenuNode::category(PlatformId::new("amazon"), c)),
    ]
}

fn arb_product() -> impl Strategy<Value = ProductRecord> {
    ("[a-z0-9]{1,8}", "[a-zA-Z ]{1,20}", arb_category(), 0u32..10_000).prop_map(
        |(id, title, category, price)| {
            ProductRecord::new(&id, &title, category, f64::from(price), "https://example.com")
        },
    )
}

fn arb_catalog_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (arb_category(), proptest::collection::vec(arb_product(), 0..8))
            .prop_map(|(category, products)| Input::CatalogLoaded { category, products }),
        arb_category().prop_map(|category| Input::CatalogFailed { category }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Same node and label always give structurally equal results
    #[test]
    fn prop_transition_is_deterministic(node in arb_node(), label in arb_label()) {
        let tree = tree();
        let first = transition(&node, Input::classify(&label, &tree), &tree);
        let second = transition(&node, Input::classify(&label, &tree), &tree);
        prop_assert_eq!(first, second);
    }

    /// Category nodes only ever sit under a browsable platform
    #[test]
    fn prop_category_nodes_are_browsable(node in arb_node(), labels in proptest::collection::vec(arb_label(), 1..10)) {
        let tree = tree();
        let mut node = node;
        for label in labels {
            node = transition(&node, Input::classify(&label, &tree), &tree).next;
            if let MenuNode::Category { platform, .. } = &node {
                prop_assert!(tree.supports_categories(platform));
            }
        }
    }

    /// Every user input produces exactly one effect
    #[test]
    fn prop_user_input_yields_one_effect(node in arb_node(), label in arb_label()) {
        let tree = tree();
        let result = transition(&node, Input::classify(&label, &tree), &tree);
        prop_assert_eq!(result.effects.len(), 1);
    }

    /// Unknown labels never move the user
    #[test]
    fn prop_unknown_label_keeps_node(node in arb_node(), label in "[a-z]{1,12}") {
        let tree = tree();
        let input = Input::classify(&label, &tree);
        prop_assume!(matches!(input, Input::Unknown(_)));
        let result = transition(&node, input, &tree);
        prop_assert_eq!(result.next, node);
        prop_assert_eq!(result.effects, vec![Effect::ShowGuidance]);
    }

    /// Catalog results: empty → ShowEmpty, otherwise at most three products in order
    #[test]
    fn prop_catalog_results_are_capped_and_ordered(node in arb_node(), input in arb_catalog_input()) {
        let tree = tree();
        let result = transition(&node, input.clone(), &tree);
        prop_assert_eq!(result.effects.len(), 1);

        match (input, &result.effects[0]) {
            (Input::CatalogLoaded { products: loaded, .. }, Effect::ShowEmpty { .. }) => {
                prop_assert!(loaded.is_empty());
            }
            (Input::CatalogLoaded { products: loaded, .. }, Effect::ShowProducts { products, .. }) => {
                prop_assert!(!loaded.is_empty());
                prop_assert!(products.len() <= MAX_LISTED_PRODUCTS);
                prop_assert_eq!(&loaded[..products.len()], &products[..]);
            }
            (Input::CatalogFailed { .. }, Effect::ShowTemporaryError) => {
                let is_category = matches!(result.next, MenuNode::Category { .. });
                prop_assert!(!is_category);
            }
            (input, effect) => {
                prop_assert!(false, "unexpected effect {:?} for {:?}", effect, input);
            }
        }
    }

    /// Start and back always land on the root menu, from anywhere
    #[test]
    fn prop_back_always_reaches_root(node in arb_node()) {
        let tree = tree();
        for input in [Input::Start, Input::Back] {
            let result = transition(&node, input, &tree);
            prop_assert_eq!(result.next, MenuNode::Root);
            let is_root_menu = matches!(&result.effects[0], Effect::ShowMenu { node: MenuNode::Root, .. });
            prop_assert!(is_root_menu);
        }
    }
}
