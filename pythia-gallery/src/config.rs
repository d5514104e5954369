//! Settings resolution for pythia-gallery
//!
//! **Priority:** command line / environment → TOML → compiled default
//!
//! Command-line flags and `PYTHIA_GALLERY_*` environment variables arrive
//! together through clap as [`ConfigOverrides`].

use crate::fetcher::Endpoints;
use crate::styles::StyleTable;
use pythia_common::config::{CompiledDefaults, TomlConfig};
use pythia_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub resource_list: Option<PathBuf>,
    pub raw_base_url: Option<String>,
    pub branch: Option<String>,
    pub book_base_url: Option<String>,
    pub workers: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub task_timeout_secs: Option<u64>,
    pub deadline_secs: Option<u64>,
}

/// Fully resolved settings for one run
///
/// Built once at startup and never modified afterwards.
#[derive(Debug, Clone)]
pub struct GallerySettings {
    pub resource_list: PathBuf,
    pub endpoints: Endpoints,
    pub workers: usize,
    pub request_timeout: Duration,
    pub task_timeout: Duration,
    pub deadline: Duration,
    pub styles: StyleTable,
}

fn pick<T: std::fmt::Debug>(name: &str, cli: Option<T>, toml: Option<T>, default: T) -> T {
    let (value, source) = match (cli, toml) {
        (Some(v), _) => (v, "command line/environment"),
        (None, Some(v)) => (v, "TOML"),
        (None, None) => (default, "default"),
    };
    debug!(setting = name, value = ?value, source, "Setting resolved");
    value
}

impl GallerySettings {
    /// Resolve and validate settings
    pub fn resolve(overrides: &ConfigOverrides, toml: &TomlConfig) -> Result<Self> {
        let o = overrides.clone();
        let t = toml.clone();

        let endpoints = Endpoints {
            raw_base_url: pick(
                "raw_base_url",
                o.raw_base_url,
                t.raw_base_url,
                CompiledDefaults::RAW_BASE_URL.to_string(),
            ),
            branch: pick("branch", o.branch, t.branch, CompiledDefaults::BRANCH.to_string()),
            book_base_url: pick(
                "book_base_url",
                o.book_base_url,
                t.book_base_url,
                CompiledDefaults::BOOK_BASE_URL.to_string(),
            ),
            config_filename: pick(
                "config_filename",
                None,
                t.config_filename,
                CompiledDefaults::CONFIG_FILENAME.to_string(),
            ),
            gallery_filename: pick(
                "gallery_filename",
                None,
                t.gallery_filename,
                CompiledDefaults::GALLERY_FILENAME.to_string(),
            ),
        };

        let settings = Self {
            resource_list: pick(
                "resource_list",
                o.resource_list,
                t.resource_list,
                PathBuf::from(CompiledDefaults::RESOURCE_LIST),
            ),
            endpoints,
            workers: pick("workers", o.workers, t.workers, CompiledDefaults::workers()),
            request_timeout: Duration::from_secs(pick(
                "request_timeout_secs",
                o.request_timeout_secs,
                t.request_timeout_secs,
                CompiledDefaults::REQUEST_TIMEOUT_SECS,
            )),
            task_timeout: Duration::from_secs(pick(
                "task_timeout_secs",
                o.task_timeout_secs,
                t.task_timeout_secs,
                CompiledDefaults::TASK_TIMEOUT_SECS,
            )),
            deadline: Duration::from_secs(pick(
                "deadline_secs",
                o.deadline_secs,
                t.deadline_secs,
                CompiledDefaults::DEADLINE_SECS,
            )),
            styles: StyleTable::from_config(&t.styles),
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        for (name, value) in [
            ("request_timeout_secs", self.request_timeout),
            ("task_timeout_secs", self.task_timeout),
            ("deadline_secs", self.deadline),
        ] {
            if value.is_zero() {
                return Err(Error::Config(format!("{} must be greater than 0", name)));
            }
        }
        for (name, url) in [
            ("raw_base_url", &self.endpoints.raw_base_url),
            ("book_base_url", &self.endpoints.book_base_url),
        ] {
            if !is_http_url(url) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.endpoints.branch.trim().is_empty() {
            return Err(Error::Config("branch must not be empty".to_string()));
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
