//! Document transform: fetch → validate → aggregate → render
//!
//! **Algorithm:**
//! 1. Locate every `pythia-cookbooks` placeholder in the document
//! 2. Fetch all cookbooks concurrently (one slot per resource, input order)
//! 3. Keep the successful records, still in input order
//! 4. Render one card per record; a record whose card fails is left out of
//!    the grid
//! 5. Aggregate tags of every fetched record and render the filter controls
//! 6. Assemble controls + grid and install the same fragment into every
//!    placeholder
//!
//! Steps 3-6 run on a single task after every fetch has resolved.

use crate::error::GalleryResult;
use crate::orchestrator::FetchOrchestrator;
use crate::render::{assemble_gallery, render_card, render_controls};
use crate::resources::load_resource_list;
use crate::styles::StyleTable;
use crate::tags::TagIndex;
use crate::types::CookbookRecord;
use pythia_common::tree::{find_all_by_type, replace_all_by_type, Node};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

/// Node type left in the tree by the directive
pub const PLACEHOLDER_TYPE: &str = "pythia-cookbooks";

/// Per-run counts, logged once the gallery is assembled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryStats {
    /// Resources in the list
    pub requested: usize,
    /// Resources whose metadata was fetched
    pub fetched: usize,
    /// Resources whose metadata could not be fetched
    pub fetch_failed: usize,
    /// Cards in the gallery
    pub rendered: usize,
    /// Fetched resources whose card could not be built
    pub render_failed: usize,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct GalleryOutcome {
    pub fragment: Node,
    pub stats: GalleryStats,
}

/// The whole gallery pipeline
pub struct GalleryPipeline {
    orchestrator: FetchOrchestrator,
    styles: StyleTable,
}

impl GalleryPipeline {
    pub fn new(orchestrator: FetchOrchestrator, styles: StyleTable) -> Self {
        Self {
            orchestrator,
            styles,
        }
    }

    /// Fetch every resource and build the gallery fragment
    pub async fn build(&self, ids: &[String]) -> GalleryOutcome {
        let slots = self.orchestrator.fetch_all(ids).await;

        let fetched: Vec<(&str, CookbookRecord)> = ids
            .iter()
            .zip(slots)
            .filter_map(|(id, slot)| slot.map(|record| (id.as_str(), record)))
            .collect();

        let mut cards = Vec::with_capacity(fetched.len());
        for (id, record) in &fetched {
            info!(resource = %id, "Rendering card");
            match render_card(record, &self.styles) {
                Ok(card) => cards.push(card),
                Err(err) => {
                    error!(resource = %id, error = %err, "Error rendering card, skipping");
                }
            }
        }

        let stats = GalleryStats {
            requested: ids.len(),
            fetched: fetched.len(),
            fetch_failed: ids.len() - fetched.len(),
            rendered: cards.len(),
            render_failed: fetched.len() - cards.len(),
        };

        let tags = TagIndex::aggregate(fetched.iter().map(|(_, record)| record));
        let controls = render_controls(&tags, &self.styles);
        let fragment = assemble_gallery(controls, cards);

        info!(
            requested = stats.requested,
            fetched = stats.fetched,
            fetch_failed = stats.fetch_failed,
            rendered = stats.rendered,
            render_failed = stats.render_failed,
            "Gallery assembled"
        );

        GalleryOutcome { fragment, stats }
    }

    /// Fill every placeholder in `document` with the gallery for `ids`
    ///
    /// A document without placeholders is returned untouched and nothing is
    /// fetched.
    pub async fn rewrite(&self, mut document: Value, ids: &[String]) -> Value {
        let placeholders = find_all_by_type(&document, PLACEHOLDER_TYPE).len();
        if placeholders == 0 {
            info!("No gallery placeholders in document");
            return document;
        }

        let outcome = self.build(ids).await;
        let fragment = outcome.fragment.to_value();
        let replaced = replace_all_by_type(&mut document, PLACEHOLDER_TYPE, &fragment);
        info!(placeholders = replaced, "Gallery installed");

        document
    }

    /// Fill every placeholder with the gallery for the resources listed in
    /// `resource_list`
    ///
    /// The list is only read when the document has a placeholder; an
    /// unreadable list is fatal.
    pub async fn transform(
        &self,
        document: Value,
        resource_list: &Path,
    ) -> GalleryResult<Value> {
        if find_all_by_type(&document, PLACEHOLDER_TYPE).is_empty() {
            info!("No gallery placeholders in document");
            return Ok(document);
        }

        let ids = load_resource_list(resource_list)?;
        info!(
            path = %resource_list.display(),
            resources = ids.len(),
            "Resource list loaded"
        );

        Ok(self.rewrite(document, &ids).await)
    }
}
