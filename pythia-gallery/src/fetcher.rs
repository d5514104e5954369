//! Cookbook metadata fetcher
//!
//! Every cookbook repository publishes two YAML documents on its default
//! branch:
//! - `myst.yml`: project config, provides `project.title`
//! - `_gallery_info.yml`: provides `thumbnail` and optional `tags`
//!
//! [`MetadataFetcher::fetch`] retrieves both and turns them into a
//! [`CookbookRecord`]. Transport, decoding and missing-field failures all come
//! back as a [`FetchError`]; the caller decides what to do with it.

use crate::error::FetchError;
use crate::types::{CookbookRecord, TagMap};
use async_trait::async_trait;
use indexmap::IndexMap;
use pythia_common::config::CompiledDefaults;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// User-Agent sent with every metadata request
const USER_AGENT: &str = concat!("pythia-gallery/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Document sources
// ============================================================================

/// Retrieves raw documents by URL
///
/// The HTTP implementation is [`HttpDocumentSource`]; tests substitute an
/// in-memory source.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the body of `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP(S) document source
pub struct HttpDocumentSource {
    http_client: reqwest::Client,
}

impl HttpDocumentSource {
    /// Create a source whose individual requests give up after `request_timeout`
    pub fn new(request_timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http_client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(network)
    }
}

// ============================================================================
// URL layout
// ============================================================================

/// Where cookbook documents and books live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base of the raw documents, one directory per cookbook
    pub raw_base_url: String,
    /// Branch segment between cookbook and filename
    pub branch: String,
    /// Base of the published books
    pub book_base_url: String,
    /// Project config document name
    pub config_filename: String,
    /// Gallery info document name
    pub gallery_filename: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            raw_base_url: CompiledDefaults::RAW_BASE_URL.to_string(),
            branch: CompiledDefaults::BRANCH.to_string(),
            book_base_url: CompiledDefaults::BOOK_BASE_URL.to_string(),
            config_filename: CompiledDefaults::CONFIG_FILENAME.to_string(),
            gallery_filename: CompiledDefaults::GALLERY_FILENAME.to_string(),
        }
    }
}

impl Endpoints {
    /// `<raw_base_url>/<id>/<branch>`
    pub fn raw_base(&self, id: &str) -> String {
        format!("{}/{}/{}", self.raw_base_url.trim_end_matches('/'), id, self.branch)
    }

    pub fn config_url(&self, id: &str) -> String {
        format!("{}/{}", self.raw_base(id), self.config_filename)
    }

    pub fn gallery_url(&self, id: &str) -> String {
        format!("{}/{}", self.raw_base(id), self.gallery_filename)
    }

    pub fn book_url(&self, id: &str) -> String {
        format!("{}/{}", self.book_base_url.trim_end_matches('/'), id)
    }

    /// Thumbnail path is relative to the cookbook's raw base
    pub fn image_url(&self, id: &str, thumbnail: &str) -> String {
        format!("{}/{}", self.raw_base(id), thumbnail.trim_start_matches('/'))
    }
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Deserialize)]
struct ProjectConfig {
    project: ProjectSection,
}

#[derive(Debug, Deserialize)]
struct ProjectSection {
    title: String,
}

#[derive(Debug, Deserialize)]
struct GalleryInfo {
    thumbnail: String,
    /// `tags:` may be missing or null; so may each category's list
    #[serde(default)]
    tags: Option<IndexMap<String, Option<Vec<String>>>>,
}

impl GalleryInfo {
    fn into_tags(self) -> TagMap {
        self.tags
            .unwrap_or_default()
            .into_iter()
            .map(|(category, tags)| (category, tags.unwrap_or_default()))
            .collect()
    }
}

/// Decode a YAML document, then check it against the expected layout
fn decode_document<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    let value: serde_yaml::Value = serde_yaml::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    serde_yaml::from_value(value).map_err(|e| FetchError::Schema {
        url: url.to_string(),
        message: e.to_string(),
    })
}

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches and validates the metadata of one cookbook
pub struct MetadataFetcher {
    source: Arc<dyn DocumentSource>,
    endpoints: Endpoints,
}

impl MetadataFetcher {
    pub fn new(source: Arc<dyn DocumentSource>, endpoints: Endpoints) -> Self {
        Self { source, endpoints }
    }

    /// Fetch both documents of cookbook `id` and build its record
    pub async fn fetch(&self, id: &str) -> Result<CookbookRecord, FetchError> {
        info!(resource = %id, "Fetching metadata");

        let config: ProjectConfig = self.fetch_yaml(&self.endpoints.config_url(id)).await?;
        let gallery: GalleryInfo = self.fetch_yaml(&self.endpoints.gallery_url(id)).await?;

        let record = CookbookRecord {
            title: config.project.title,
            book_url: self.endpoints.book_url(id),
            image_url: self.endpoints.image_url(id, &gallery.thumbnail),
            tags: gallery.into_tags(),
        };

        debug!(
            resource = %id,
            title = %record.title,
            categories = record.tags.len(),
            "Metadata fetched"
        );

        Ok(record)
    }

    async fn fetch_yaml<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        info!(url = %url, "Fetching document");
        let body = self.source.fetch(url).await?;
        decode_document(url, &body)
    }
}

// ============================================================================
// Tests
// ============================================================================
