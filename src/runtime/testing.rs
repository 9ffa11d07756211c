//! Mock implementations for testing
//!
//! These mocks let the dispatcher run without files or network.

use super::traits::{DeliveryError, Presenter};
use crate::caption::Caption;
use crate::catalog::{CatalogError, CatalogProvider, CatalogResult, ProductRecord, MAX_LISTED_PRODUCTS};
use crate::navigation::{CategoryId, Keyboard};
use crate::session::ChatId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// Mock Presenter
// ============================================================================

/// One recorded outbound send
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Menu {
        chat: ChatId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Card {
        chat: ChatId,
        photo: Option<PathBuf>,
        caption: Caption,
        url: String,
    },
    Fallback {
        chat: ChatId,
        text: String,
        url: String,
    },
}

/// Presenter that records every send and fails on request
#[derive(Default)]
pub struct MockPresenter {
    sent: Mutex<Vec<Sent>>,
    fail_rich: HashSet<String>,
    fail_plain: HashSet<String>,
    fail_menus: bool,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the rich card for this purchase URL
    pub fn failing_rich(mut self, url: &str) -> Self {
        self.fail_rich.insert(url.to_string());
        self
    }

    /// Reject the plain fallback for this purchase URL
    pub fn failing_plain(mut self, url: &str) -> Self {
        self.fail_plain.insert(url.to_string());
        self
    }

    pub fn failing_menus(mut self) -> Self {
        self.fail_menus = true;
        self
    }

    /// Successful sends, in order
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn menus(&self) -> Vec<(String, Option<Keyboard>)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Menu { text, keyboard, .. } => Some((text, keyboard)),
                _ => None,
            })
            .collect()
    }

    pub fn cards(&self) -> Vec<Caption> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Card { caption, .. } => Some(caption),
                _ => None,
            })
            .collect()
    }

    pub fn fallbacks(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Fallback { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Presenter for MockPresenter {
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<(), DeliveryError> {
        if self.fail_menus {
            return Err(DeliveryError::new("menu rejected"));
        }
        self.record(Sent::Menu {
            chat,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn send_product_card(
        &self,
        chat: ChatId,
        photo: Option<&Path>,
        caption: &Caption,
        purchase_url: &str,
    ) -> Result<(), DeliveryError> {
        if self.fail_rich.contains(purchase_url) {
            return Err(DeliveryError::new("Bad Request: can't parse entities"));
        }
        self.record(Sent::Card {
            chat,
            photo: photo.map(Path::to_path_buf),
            caption: caption.clone(),
            url: purchase_url.to_string(),
        });
        Ok(())
    }

    async fn send_plain_fallback(&self, chat: ChatId, text: &str, purchase_url: &str) -> Result<(), DeliveryError> {
        if self.fail_plain.contains(purchase_url) {
            return Err(DeliveryError::new("plain rejected"));
        }
        self.record(Sent::Fallback {
            chat,
            text: text.to_string(),
            url: purchase_url.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Static Catalog
// ============================================================================

enum Source {
    Records(Vec<ProductRecord>),
    Unavailable(PathBuf),
    Malformed(String),
}

/// In-memory catalog with the same filtering as the file-backed one
pub struct StaticCatalog {
    source: Source,
    calls: Mutex<usize>,
}

impl StaticCatalog {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self::from_source(Source::Records(records))
    }

    pub fn unavailable(path: impl Into<PathBuf>) -> Self {
        Self::from_source(Source::Unavailable(path.into()))
    }

    pub fn malformed(reason: &str) -> Self {
        Self::from_source(Source::Malformed(reason.to_string()))
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_by_category(&self, category: &CategoryId) -> CatalogResult<Vec<ProductRecord>> {
        *self.calls.lock().unwrap() += 1;
        match &self.source {
            Source::Records(records) => Ok(records
                .iter()
                .filter(|r| &r.category == category)
                .take(MAX_LISTED_PRODUCTS)
                .cloned()
                .collect()),
            Source::Unavailable(path) => Err(CatalogError::SourceUnavailable {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
            Source::Malformed(reason) => Err(CatalogError::SourceMalformed(reason.clone())),
        }
    }
}
