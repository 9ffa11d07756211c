//! Per-event dispatcher
//!
//! Classifies an inbound label, runs the pure transition, executes the
//! resulting effects and stores the new node. Catalog reads are effects too:
//! their outcome is fed back as a follow-up input, so a single user tap can
//! take two passes through `transition`.

use super::traits::Presenter;
use crate::caption;
use crate::catalog::{CatalogProvider, ProductRecord};
use crate::messages;
use crate::navigation::{current_category, transition, CategoryId, Effect, Input, Keyboard, MenuNode, MenuTree};
use crate::session::{ChatId, SessionStore};
use chrono::Timelike;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of sending one product card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardDelivery {
    Rich,
    PlainFallback,
    Skipped,
}

pub struct Dispatcher<C: CatalogProvider, P: Presenter> {
    tree: Arc<MenuTree>,
    catalog: C,
    presenter: P,
    sessions: Arc<SessionStore>,
    placeholder_image: Option<PathBuf>,
}

impl<C: CatalogProvider, P: Presenter> Dispatcher<C, P> {
    pub fn new(tree: Arc<MenuTree>, catalog: C, presenter: P, sessions: Arc<SessionStore>) -> Self {
        Self {
            tree,
            catalog,
            presenter,
            sessions,
            placeholder_image: None,
        }
    }

    /// Image sent for products whose own image is missing
    #[must_use]
    pub fn with_placeholder_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.placeholder_image = Some(path.into());
        self
    }

    /// Handle one inbound text message end to end
    pub async fn handle_text(&self, chat: ChatId, text: &str) {
        let _turn = self.sessions.lock_chat(chat).await;
        let input = Input::classify(text, &self.tree);
        let mut node = self.sessions.node(chat).await;
        tracing::debug!(chat, ?input, from = ?node, "Handling input");

        // Follow-up inputs from catalog reads are processed in order
        let mut inputs = VecDeque::from([input]);
        while let Some(input) = inputs.pop_front() {
            let result = transition(&node, input, &self.tree);
            node = result.next;

            for effect in result.effects {
                tracing::debug!(
                    chat,
                    effect = effect.kind(),
                    category = ?current_category(&node),
                    "Executing effect"
                );
                if let Some(follow_up) = self.execute_effect(chat, effect).await {
                    inputs.push_back(follow_up);
                }
            }
        }

        self.sessions.set(chat, node).await;
    }

    async fn execute_effect(&self, chat: ChatId, effect: Effect) -> Option<Input> {
        match effect {
            Effect::ShowMenu { node, keyboard } => {
                let text = messages::menu_text(&node, &self.tree, local_hour());
                self.send_menu(chat, &text, Some(&keyboard)).await;
                None
            }

            Effect::LoadCatalog { category } => match self.catalog.list_by_category(&category).await {
                Ok(products) => Some(Input::CatalogLoaded { category, products }),
                Err(e) => {
                    tracing::error!(chat, category = %category, error = %e, "Catalog read failed");
                    Some(Input::CatalogFailed { category })
                }
            },

            Effect::ShowProducts {
                category,
                products,
                keyboard,
            } => {
                self.show_products(chat, &category, &products, &keyboard).await;
                None
            }

            Effect::ShowEmpty { category, keyboard } => {
                tracing::info!(chat, category = %category, "Category is empty");
                self.send_menu(chat, messages::EMPTY_CATEGORY, Some(&keyboard)).await;
                None
            }

            Effect::ShowComingSoon {
                platform,
                label,
                keyboard,
            } => {
                tracing::debug!(chat, platform = %platform, "Platform not browsable yet");
                let alternative = self.tree.default_platform().map(|p| p.label.as_str());
                let text = messages::coming_soon(&label, alternative);
                self.send_menu(chat, &text, Some(&keyboard)).await;
                None
            }

            Effect::ShowTemporaryError => {
                self.send_menu(chat, messages::TEMPORARY_ERROR, None).await;
                None
            }

            Effect::ShowGuidance => {
                self.send_menu(chat, messages::GUIDANCE, None).await;
                None
            }
        }
    }

    /// Loading notice, the cards in list order, then the end-of-list menu
    async fn show_products(&self, chat: ChatId, category: &CategoryId, products: &[ProductRecord], keyboard: &Keyboard) {
        let label = self
            .tree
            .category(category)
            .map_or(category.as_str(), |c| c.label.as_str());
        self.send_menu(chat, &messages::loading_products(label), Some(&Keyboard::Remove))
            .await;

        let mut fallbacks = 0;
        let mut skipped = 0;
        for (index, product) in products.iter().enumerate() {
            let photo = self.photo_for(product).await;
            match self.deliver_card(chat, product, index + 1, photo.as_deref()).await {
                CardDelivery::Rich => {}
                CardDelivery::PlainFallback => fallbacks += 1,
                CardDelivery::Skipped => skipped += 1,
            }
        }
        tracing::info!(
            chat,
            category = %category,
            shown = products.len() - skipped,
            fallbacks,
            skipped,
            "Products shown"
        );

        self.send_menu(chat, messages::END_OF_LIST, Some(keyboard)).await;
    }

    /// Rich card first; exactly one plain retry; otherwise skip the product
    async fn deliver_card(&self, chat: ChatId, product: &ProductRecord, index: usize, photo: Option<&Path>) -> CardDelivery {
        let rich = caption::render(product, index);
        let Err(rich_error) = self
            .presenter
            .send_product_card(chat, photo, &rich, &product.detail_url)
            .await
        else {
            return CardDelivery::Rich;
        };

        tracing::warn!(
            chat,
            product_id = %product.id,
            error = %rich_error,
            "Rich card rejected, retrying as plain text"
        );
        let plain = caption::render_plain(product, index);
        match self
            .presenter
            .send_plain_fallback(chat, &plain.text, &product.detail_url)
            .await
        {
            Ok(()) => CardDelivery::PlainFallback,
            Err(e) => {
                tracing::warn!(chat, product_id = %product.id, error = %e, "Plain fallback failed, skipping product");
                CardDelivery::Skipped
            }
        }
    }

    /// Product image if present on disk, else the placeholder if present
    async fn photo_for(&self, product: &ProductRecord) -> Option<PathBuf> {
        for path in product.image_path.iter().chain(self.placeholder_image.iter()) {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Some(path.clone());
            }
        }
        None
    }

    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) {
        if let Err(e) = self.presenter.send_menu(chat, text, keyboard).await {
            tracing::warn!(chat, error = %e, "Failed to send menu");
        }
    }
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}
