//! Product catalog
//!
//! Records are read from an external source on every request; nothing is
//! cached between events.

mod json_file;

pub use json_file::JsonFileCatalog;

use crate::navigation::CategoryId;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Most products shown for one category selection
pub const MAX_LISTED_PRODUCTS: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog source {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog source malformed: {0}")]
    SourceMalformed(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One product as stored in the catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Numeric ids in the source are kept in their decimal form
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    pub category: CategoryId,
    pub new_price: f64,
    /// 0 means no discount
    #[serde(default)]
    pub old_price: f64,
    pub detail_url: String,
    #[serde(default, rename = "image")]
    pub image_path: Option<PathBuf>,
}

impl ProductRecord {
    /// A discount exists only when an old price is set
    pub fn has_discount(&self) -> bool {
        self.old_price > 0.0
    }

    /// `old_price - new_price`, or `None` without a discount
    pub fn savings(&self) -> Option<f64> {
        self.has_discount().then(|| self.old_price - self.new_price)
    }

    /// Field checks that serde cannot express
    fn validate(&self) -> Result<(), String> {
        if !(self.new_price.is_finite() && self.new_price >= 0.0) {
            return Err(format!("product {}: new_price must be a non-negative number", self.id));
        }
        if !(self.old_price.is_finite() && self.old_price >= 0.0) {
            return Err(format!("product {}: old_price must be a non-negative number", self.id));
        }
        if self.detail_url.trim().is_empty() {
            return Err(format!("product {}: detail_url is empty", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
impl ProductRecord {
    pub fn new(id: &str, title: &str, category: CategoryId, new_price: f64, detail_url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            new_price,
            old_price: 0.0,
            detail_url: detail_url.to_string(),
            image_path: None,
        }
    }

    pub fn with_old_price(mut self, old_price: f64) -> Self {
        self.old_price = old_price;
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Source of product records
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// First [`MAX_LISTED_PRODUCTS`] records of a category, in source order.
    ///
    /// Fails atomically: either the whole source validates or nothing is returned.
    async fn list_by_category(&self, category: &CategoryId) -> CatalogResult<Vec<ProductRecord>>;
}

#[async_trait]
impl<T: CatalogProvider + ?Sized> CatalogProvider for std::sync::Arc<T> {
    async fn list_by_category(&self, category: &CategoryId) -> CatalogResult<Vec<ProductRecord>> {
        (**self).list_by_category(category).await
    }
}
