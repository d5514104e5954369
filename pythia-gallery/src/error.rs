//! Error types for pythia-gallery
//!
//! Two classes of error exist:
//! - per-resource errors ([`FetchError`], [`RenderError`]): logged with the
//!   resource identifier, the resource is left out of the gallery, the batch
//!   carries on
//! - [`GalleryError`]: everything outside the per-resource boundary; fatal

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve or decode the metadata of one resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Body is not a YAML document
    #[error("Failed to decode {url}: {message}")]
    Decode { url: String, message: String },

    /// Document decoded but a required field is missing or mistyped
    #[error("Unexpected document layout in {url}: {message}")]
    Schema { url: String, message: String },

    /// Resource did not complete within its time budget
    #[error("Timed out after {after:?}")]
    Timeout { after: Duration },

    /// Fetch phase deadline reached before this resource completed
    #[error("Cancelled: fetch deadline reached")]
    Cancelled,
}

/// Malformed record found while building its card
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Field '{field}' is empty")]
    EmptyField { field: &'static str },
}

/// Fatal pipeline error
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Resource list could not be read
    #[error("Failed to read resource list {path}: {source}")]
    ResourceList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directive name not provided by this plugin
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),

    /// Roles are not provided by this plugin
    #[error("Role not supported: {0}")]
    RoleUnsupported(String),

    /// HTTP client construction failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result type for fatal pipeline operations
pub type GalleryResult<T> = Result<T, GalleryError>;
