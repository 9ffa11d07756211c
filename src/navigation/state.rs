//! Menu tree positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a shopping platform (e.g. `amazon`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a product category, matching the `category` key of catalog records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a user in the navigation tree
///
/// A `Category` node always names a platform that supports categories;
/// the transition function is the only constructor of such nodes and
/// upholds this.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuNode {
    #[default]
    Root,
    Platform {
        platform: PlatformId,
    },
    Category {
        platform: PlatformId,
        category: CategoryId,
    },
}

impl MenuNode {
    pub fn platform(platform: PlatformId) -> Self {
        MenuNode::Platform { platform }
    }

    pub fn category(platform: PlatformId, category: CategoryId) -> Self {
        MenuNode::Category { platform, category }
    }

    /// Platform this node sits under, if any
    pub fn platform_id(&self) -> Option<&PlatformId> {
        match self {
            MenuNode::Root => None,
            MenuNode::Platform { platform } | MenuNode::Category { platform, .. } => Some(platform),
        }
    }

    /// The enclosing menu: categories fall back to their platform, everything else stays put
    pub fn parent(&self) -> MenuNode {
        match self {
            MenuNode::Category { platform, .. } => MenuNode::platform(platform.clone()),
            other => other.clone(),
        }
    }
}
