//! Tag aggregation across cookbooks
//!
//! Only the two known categories are aggregated; any other category found in
//! a record is ignored here (its labels still show on the card).

use crate::types::{CookbookRecord, KnownCategory};
use std::collections::BTreeSet;

/// Distinct tags per known category
///
/// Sets iterate in lexicographic order, which is the order the filter
/// controls present them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    domains: BTreeSet<String>,
    packages: BTreeSet<String>,
}

impl TagIndex {
    /// Union the tags of every record
    pub fn aggregate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CookbookRecord>,
    {
        let mut index = Self::default();
        for record in records {
            index.add(record);
        }
        index
    }

    /// Union one record's tags into the index
    pub fn add(&mut self, record: &CookbookRecord) {
        for category in KnownCategory::ALL {
            self.set_mut(category)
                .extend(record.tags_in(category).iter().cloned());
        }
    }

    pub fn tags(&self, category: KnownCategory) -> &BTreeSet<String> {
        match category {
            KnownCategory::Domains => &self.domains,
            KnownCategory::Packages => &self.packages,
        }
    }

    fn set_mut(&mut self, category: KnownCategory) -> &mut BTreeSet<String> {
        match category {
            KnownCategory::Domains => &mut self.domains,
            KnownCategory::Packages => &mut self.packages,
        }
    }

    /// Categories in presentation order with their tags
    pub fn iter(&self) -> impl Iterator<Item = (KnownCategory, &BTreeSet<String>)> {
        KnownCategory::ALL
            .into_iter()
            .map(move |category| (category, self.tags(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.packages.is_empty()
    }
}
