//! Navigation tree data and keyboard layouts
//!
//! Platforms and categories are plain data: adding one is a change to
//! [`MenuTree::storefront`], not to the transition function.

use super::state::{CategoryId, PlatformId};
use std::collections::HashSet;
use thiserror::Error;

const START_COMMAND: &str = "/start";
const BACK_LABEL: &str = "↩️ رجوع إلى المنصات";
const SHOW_MORE_LABEL: &str = "🛒 عرض المزيد";
const PLATFORM_PLACEHOLDER: &str = "👉 اختر منصة...";
const CATEGORY_PLACEHOLDER: &str = "🎯 اختر القسم...";

const PLATFORMS_PER_ROW: usize = 1;
const CATEGORIES_PER_ROW: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuTreeError {
    #[error("Duplicate button label: {0}")]
    DuplicateLabel(String),
    #[error("Categories are defined but no platform supports them")]
    NoCategoryPlatform,
}

/// A selectable shopping platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEntry {
    pub id: PlatformId,
    pub label: String,
    /// Only platforms with categories lead anywhere; the rest are "coming soon" leaves
    pub has_categories: bool,
}

impl PlatformEntry {
    pub fn new(id: &str, label: &str, has_categories: bool) -> Self {
        Self {
            id: PlatformId::new(id),
            label: label.to_string(),
            has_categories,
        }
    }
}

/// A product category offered under category-capable platforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub label: String,
}

impl CategoryEntry {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: CategoryId::new(id),
            label: label.to_string(),
        }
    }
}

/// Reply keyboard shown under a menu message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    Reply {
        rows: Vec<Vec<String>>,
        placeholder: Option<String>,
    },
    /// Hide the reply keyboard
    Remove,
}

impl Keyboard {
    /// Lay labels out left to right, `per_row` buttons per row
    pub fn grid<I, S>(labels: I, per_row: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let rows = labels
            .chunks(per_row.max(1))
            .map(<[String]>::to_vec)
            .collect();
        Keyboard::Reply {
            rows,
            placeholder: None,
        }
    }

    /// Explicit rows, as given
    pub fn rows(rows: Vec<Vec<&str>>) -> Self {
        Keyboard::Reply {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
            placeholder: None,
        }
    }

    #[must_use]
    pub fn with_placeholder(self, text: &str) -> Self {
        match self {
            Keyboard::Reply { rows, .. } => Keyboard::Reply {
                rows,
                placeholder: Some(text.to_string()),
            },
            Keyboard::Remove => Keyboard::Remove,
        }
    }

    /// All button labels, row-major
    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Keyboard::Reply { rows, .. } => rows.iter().flatten().map(String::as_str).collect(),
            Keyboard::Remove => Vec::new(),
        }
    }
}

/// The navigation tree: root → platform → category
#[derive(Debug, Clone)]
pub struct MenuTree {
    start_command: String,
    back_label: String,
    show_more_label: String,
    platforms: Vec<PlatformEntry>,
    categories: Vec<CategoryEntry>,
}

impl MenuTree {
    /// Build a tree, rejecting layouts where one label could mean two things
    pub fn new(
        start_command: &str,
        back_label: &str,
        show_more_label: &str,
        platforms: Vec<PlatformEntry>,
        categories: Vec<CategoryEntry>,
    ) -> Result<Self, MenuTreeError> {
        let mut seen = HashSet::new();
        let all_labels = [start_command, back_label, show_more_label]
            .into_iter()
            .chain(platforms.iter().map(|p| p.label.as_str()))
            .chain(categories.iter().map(|c| c.label.as_str()));
        for label in all_labels {
            if !seen.insert(label) {
                return Err(MenuTreeError::DuplicateLabel(label.to_string()));
            }
        }

        if !categories.is_empty() && !platforms.iter().any(|p| p.has_categories) {
            return Err(MenuTreeError::NoCategoryPlatform);
        }

        Ok(Self {
            start_command: start_command.to_string(),
            back_label: back_label.to_string(),
            show_more_label: show_more_label.to_string(),
            platforms,
            categories,
        })
    }

    /// The storefront tree: three platforms, only Amazon browsable
    pub fn storefront() -> Result<Self, MenuTreeError> {
        Self::new(
            START_COMMAND,
            BACK_LABEL,
            SHOW_MORE_LABEL,
            vec![
                PlatformEntry::new("express", "⚡ علي إكس براس", false),
                PlatformEntry::new("trendyol", "🛍️ تريندويل", false),
                PlatformEntry::new("amazon", "🚀 أمازون", true),
            ],
            vec![
                CategoryEntry::new("groceries", "🛒 مواد غذائية"),
                CategoryEntry::new("beauty", "💄 الجمال"),
                CategoryEntry::new("mobiles", "📱 الجوالات"),
                CategoryEntry::new("home_appliances", "🏠 الأجهزة المنزلية"),
            ],
        )
    }

    /// True for `/start`, `/start@botname` and `/start <payload>`
    pub fn is_start_command(&self, text: &str) -> bool {
        let command = text.split_whitespace().next().unwrap_or_default();
        let command = command.split('@').next().unwrap_or_default();
        command == self.start_command
    }

    pub fn back_label(&self) -> &str {
        &self.back_label
    }

    pub fn show_more_label(&self) -> &str {
        &self.show_more_label
    }

    #[cfg(test)]
    pub fn platforms(&self) -> &[PlatformEntry] {
        &self.platforms
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn platform(&self, id: &PlatformId) -> Option<&PlatformEntry> {
        self.platforms.iter().find(|p| &p.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn platform_by_label(&self, label: &str) -> Option<&PlatformEntry> {
        self.platforms.iter().find(|p| p.label == label)
    }

    pub fn category_by_label(&self, label: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn supports_categories(&self, id: &PlatformId) -> bool {
        self.platform(id).is_some_and(|p| p.has_categories)
    }

    /// First platform that has categories; target of "show more" from outside a platform
    pub fn default_platform(&self) -> Option<&PlatformEntry> {
        self.platforms.iter().find(|p| p.has_categories)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.iter().map(|c| c.id.clone())
    }

    // ==================== Keyboards ====================

    pub fn root_keyboard(&self) -> Keyboard {
        Keyboard::grid(self.platforms.iter().map(|p| p.label.as_str()), PLATFORMS_PER_ROW)
            .with_placeholder(PLATFORM_PLACEHOLDER)
    }

    pub fn platform_keyboard(&self) -> Keyboard {
        let labels = self
            .categories
            .iter()
            .map(|c| c.label.as_str())
            .chain(std::iter::once(self.back_label.as_str()));
        Keyboard::grid(labels, CATEGORIES_PER_ROW).with_placeholder(CATEGORY_PLACEHOLDER)
    }

    /// Suggest the browsable platform instead
    pub fn coming_soon_keyboard(&self) -> Keyboard {
        match self.default_platform() {
            Some(platform) => Keyboard::rows(vec![vec![platform.label.as_str()], vec![self.back_label.as_str()]]),
            None => Keyboard::rows(vec![vec![self.back_label.as_str()]]),
        }
    }

    pub fn product_list_keyboard(&self) -> Keyboard {
        Keyboard::rows(vec![vec![self.show_more_label.as_str(), self.back_label.as_str()]])
    }

    pub fn empty_category_keyboard(&self) -> Keyboard {
        Keyboard::rows(vec![vec![self.back_label.as_str()]])
    }
}
