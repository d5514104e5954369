//! Tag label styles
//!
//! Built once at startup from the `[styles]` config section and shared by
//! reference with every renderer.

use crate::types::{Category, KnownCategory};
use pythia_common::config::{CompiledDefaults, StyleConfig};
use serde::Serialize;
use serde_json::Value;

/// Inline style of a tag label or filter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub background: String,
    pub display: &'static str,
    pub border_radius: u32,
    pub color: &'static str,
    pub padding: u32,
    pub margin: u32,
}

impl LabelStyle {
    /// Pill layout shared by all labels, with the given background
    pub fn pill(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            display: "inline-block",
            border_radius: 8,
            color: "white",
            padding: 5,
            margin: 5,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Style per category, with a fallback for categories the gallery does not know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    domains: LabelStyle,
    packages: LabelStyle,
    fallback: LabelStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

impl StyleTable {
    pub fn from_config(config: &StyleConfig) -> Self {
        let pick = |configured: &Option<String>, default: &str| {
            LabelStyle::pill(configured.as_deref().unwrap_or(default))
        };

        Self {
            domains: pick(&config.domains, CompiledDefaults::DOMAINS_BACKGROUND),
            packages: pick(&config.packages, CompiledDefaults::PACKAGES_BACKGROUND),
            fallback: pick(&config.default, CompiledDefaults::DEFAULT_BACKGROUND),
        }
    }

    pub fn for_category(&self, category: Category<'_>) -> &LabelStyle {
        match category {
            Category::Known(KnownCategory::Domains) => &self.domains,
            Category::Known(KnownCategory::Packages) => &self.packages,
            Category::Other(_) => &self.fallback,
        }
    }

    pub fn for_key(&self, key: &str) -> &LabelStyle {
        self.for_category(Category::from_key(key))
    }
}
