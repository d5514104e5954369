//! pythia-gallery library interface
//!
//! Builds the Pythia cookbook gallery: fetches each cookbook's metadata
//! concurrently, aggregates tags and renders cards plus filter controls into
//! the document tree handed over by the host.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod plugin;
pub mod render;
pub mod resources;
pub mod styles;
pub mod tags;
pub mod transform;
pub mod types;

pub use crate::error::{FetchError, GalleryError, GalleryResult, RenderError};
pub use crate::transform::{GalleryOutcome, GalleryPipeline, GalleryStats, PLACEHOLDER_TYPE};

use crate::config::GallerySettings;
use crate::fetcher::{HttpDocumentSource, MetadataFetcher};
use crate::orchestrator::FetchOrchestrator;
use std::sync::Arc;

/// Build the HTTP-backed pipeline described by `settings`
pub fn build_pipeline(settings: &GallerySettings) -> GalleryResult<GalleryPipeline> {
    let source = HttpDocumentSource::new(settings.request_timeout)?;
    let fetcher = MetadataFetcher::new(Arc::new(source), settings.endpoints.clone());
    let orchestrator = FetchOrchestrator::new(Arc::new(fetcher), settings.workers)
        .with_task_timeout(settings.task_timeout)
        .with_deadline(settings.deadline);

    Ok(GalleryPipeline::new(orchestrator, settings.styles.clone()))
}
