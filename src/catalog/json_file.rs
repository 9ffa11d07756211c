//! JSON file catalog

use super::{CatalogError, CatalogProvider, CatalogResult, ProductRecord, MAX_LISTED_PRODUCTS};
use crate::navigation::CategoryId;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Catalog backed by a JSON array of product objects on disk.
///
/// The file is re-read and re-validated on every call.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
    /// When set, records naming any other category make the source malformed
    known_categories: Option<HashSet<CategoryId>>,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            known_categories: None,
        }
    }

    #[must_use]
    pub fn with_known_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.known_categories = Some(categories.into_iter().collect());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the whole source
    pub async fn load(&self) -> CatalogResult<Vec<ProductRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::SourceUnavailable {
                path: self.path.clone(),
                source,
            })?;

        let products = self.parse(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "Loaded products from catalog"
        );
        Ok(products)
    }

    fn parse(&self, bytes: &[u8]) -> CatalogResult<Vec<ProductRecord>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::SourceMalformed(format!("invalid JSON: {e}")))?;

        let Value::Array(items) = value else {
            return Err(CatalogError::SourceMalformed(
                "expected a list of product objects".to_string(),
            ));
        };

        let mut seen_ids = HashSet::new();
        let mut products = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let product: ProductRecord = serde_json::from_value(item)
                .map_err(|e| CatalogError::SourceMalformed(format!("item {index}: {e}")))?;
            product.validate().map_err(CatalogError::SourceMalformed)?;

            if let Some(known) = &self.known_categories {
                if !known.contains(&product.category) {
                    return Err(CatalogError::SourceMalformed(format!(
                        "product {}: unknown category {}",
                        product.id, product.category
                    )));
                }
            }
            if !seen_ids.insert(product.id.clone()) {
                return Err(CatalogError::SourceMalformed(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            products.push(product);
        }
        Ok(products)
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn list_by_category(&self, category: &CategoryId) -> CatalogResult<Vec<ProductRecord>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|p| &p.category == category)
            .take(MAX_LISTED_PRODUCTS)
            .collect())
    }
}
