//! Core types: cookbook records and tag categories

use indexmap::IndexMap;
use serde::Serialize;

/// Tags of one cookbook: category name → tags, in document order
pub type TagMap = IndexMap<String, Vec<String>>;

/// Metadata of one successfully fetched cookbook
///
/// Built once by the fetcher and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookbookRecord {
    /// `project.title` from the project config
    pub title: String,
    /// Published book location
    pub book_url: String,
    /// Absolute thumbnail location
    pub image_url: String,
    /// Tags per category, category order as written in the gallery info
    pub tags: TagMap,
}

impl CookbookRecord {
    /// Every tag across all categories, category order then tag order
    ///
    /// Duplicates are kept.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.values().flatten().map(String::as_str)
    }

    /// Tags of one category; empty when the category is absent
    pub fn tags_in(&self, category: KnownCategory) -> &[String] {
        self.tags
            .get(category.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// The two tag groupings the gallery filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownCategory {
    /// Scientific domain ("climate", "ocean", ...)
    Domains,
    /// Python package ("xarray", "matplotlib", ...)
    Packages,
}

impl KnownCategory {
    /// Presentation order of the filter groups
    pub const ALL: [KnownCategory; 2] = [KnownCategory::Domains, KnownCategory::Packages];

    /// Key used in `_gallery_info.yml` and as the control group's class
    pub fn key(self) -> &'static str {
        match self {
            KnownCategory::Domains => "domains",
            KnownCategory::Packages => "packages",
        }
    }

    /// Heading of the category's filter group
    pub fn filter_label(self) -> &'static str {
        match self {
            KnownCategory::Domains => "Filter by Domain:",
            KnownCategory::Packages => "Filter by Package:",
        }
    }
}

/// Category of a tag as found in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    Known(KnownCategory),
    Other(&'a str),
}

impl<'a> Category<'a> {
    pub fn from_key(key: &'a str) -> Self {
        KnownCategory::ALL
            .into_iter()
            .find(|known| known.key() == key)
            .map(Category::Known)
            .unwrap_or(Category::Other(key))
    }
}
