//! Shared test helpers
//!
//! - [`StaticSource`]: in-memory document source with per-cookbook delays
//! - [`LogCapture`]: tracing layer recording events for assertions
//! - builders for pipelines, documents and fragment inspection

#![allow(dead_code)]

use async_trait::async_trait;
use pythia_common::Node;
use pythia_gallery::fetcher::{DocumentSource, Endpoints, MetadataFetcher};
use pythia_gallery::orchestrator::FetchOrchestrator;
use pythia_gallery::styles::StyleTable;
use pythia_gallery::{FetchError, GalleryPipeline};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const RAW_BASE: &str = "http://raw.test/org";
pub const BOOK_BASE: &str = "http://books.test";

// ============================================================================
// Document source
// ============================================================================

/// Serves documents from memory; unknown URLs answer 404
#[derive(Default, Clone)]
pub struct StaticSource {
    docs: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add both documents of a cookbook; `gallery_extra` is appended to the
    /// gallery info (e.g. a `tags:` block)
    pub fn with_cookbook(self, id: &str, title: &str, gallery_extra: &str) -> Self {
        let e = endpoints();
        self.with_document(&e.config_url(id), &format!("project:\n  title: \"{}\"\n", title))
            .with_document(
                &e.gallery_url(id),
                &format!("thumbnail: thumbnail.png\n{}", gallery_extra),
            )
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.docs.insert(url.to_string(), body.to_string());
        self
    }

    /// Delay every request for cookbook `id`
    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let id = url
            .strip_prefix(RAW_BASE)
            .and_then(|rest| rest.trim_start_matches('/').split('/').next())
            .unwrap_or_default();
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.docs.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn endpoints() -> Endpoints {
    Endpoints {
        raw_base_url: RAW_BASE.to_string(),
        book_base_url: BOOK_BASE.to_string(),
        ..Endpoints::default()
    }
}

pub fn pipeline(source: StaticSource, workers: usize) -> GalleryPipeline {
    let fetcher = MetadataFetcher::new(Arc::new(source), endpoints());
    let orchestrator = FetchOrchestrator::new(Arc::new(fetcher), workers)
        .with_task_timeout(Duration::from_secs(5));
    GalleryPipeline::new(orchestrator, StyleTable::default())
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Documents and fragments
// ============================================================================

/// A page with a heading, `placeholders` gallery placeholders and a footer
pub fn document_with_placeholders(placeholders: usize) -> Value {
    let mut children = vec![json!({
        "type": "heading",
        "depth": 1,
        "children": [{"type": "text", "value": "Cookbooks"}]
    })];
    for i in 0..placeholders {
        children.push(json!({
            "type": "block",
            "children": [{
                "type": "pythia-cookbooks",
                "label": format!("gallery-{}", i),
                "children": []
            }]
        }));
    }
    children.push(json!({"type": "paragraph", "children": [{"type": "text", "value": "footer"}]}));
    json!({"type": "root", "children": children})
}

/// Cards in the fragment's grid
pub fn cards(fragment: &Node) -> &[Node] {
    fragment.children()[1].children()
}

/// Book URL of every card, in grid order
pub fn card_urls(fragment: &Node) -> Vec<String> {
    cards(fragment)
        .iter()
        .map(|card| card.prop("url").and_then(Value::as_str).unwrap_or_default().to_string())
        .collect()
}

/// Label texts shown on a card
pub fn card_labels(card: &Node) -> Vec<String> {
    card.children()[1].children()[1]
        .children()
        .iter()
        .map(|label| {
            label.children()[0]
                .prop("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// Checkbox tags of the filter group with class `category`
pub fn filter_tags(fragment: &Node, category: &str) -> Vec<String> {
    let controls = &fragment.children()[0];
    let group = controls
        .children()
        .iter()
        .find(|g| g.prop("class") == Some(&json!([category])))
        .expect("filter group missing");
    group.children()[1..]
        .iter()
        .map(|row| {
            row.children()[0].prop("properties").unwrap()["rel"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect()
}

// ============================================================================
// Log capture
// ============================================================================

/// Captured log event
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: tracing::Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

/// Tracing layer that records every event
#[derive(Clone, Default)]
pub struct LogCapture {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Events at `level` whose `field` equals `value`
    pub fn count_with_field(&self, level: tracing::Level, field: &str, value: &str) -> usize {
        self.records()
            .iter()
            .filter(|r| r.level == level && r.fields.get(field).map(String::as_str) == Some(value))
            .count()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(pattern))
    }
}

impl<S> tracing_subscriber::Layer<S> for LogCapture
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        use tracing::field::{Field, Visit};

        #[derive(Default)]
        struct FieldVisitor {
            message: String,
            fields: HashMap<String, String>,
        }

        impl Visit for FieldVisitor {
            fn record_str(&mut self, field: &Field, value: &str) {
                self.fields.insert(field.name().to_string(), value.to_string());
            }

            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                let rendered = format!("{:?}", value);
                if field.name() == "message" {
                    self.message = rendered;
                } else {
                    self.fields.insert(field.name().to_string(), rendered);
                }
            }
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.records.lock().unwrap().push(LogRecord {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}
