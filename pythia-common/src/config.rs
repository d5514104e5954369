//! Configuration file loading and location
//!
//! The TOML file is optional. Every key is optional as well: a missing file or
//! a missing key falls back to [`CompiledDefaults`]. Callers layer command-line
//! flags and environment variables on top (see `pythia_gallery::config`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PYTHIA_GALLERY_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pythia-gallery.toml";

/// TOML configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Line-delimited list of resource identifiers
    pub resource_list: Option<PathBuf>,
    /// Base URL of the raw metadata documents
    pub raw_base_url: Option<String>,
    /// Branch segment between identifier and filename
    pub branch: Option<String>,
    /// Base URL of the published books
    pub book_base_url: Option<String>,
    /// Name of the project config document
    pub config_filename: Option<String>,
    /// Name of the gallery info document
    pub gallery_filename: Option<String>,
    /// Fetch worker pool size
    pub workers: Option<usize>,
    /// Timeout for a single HTTP request
    pub request_timeout_secs: Option<u64>,
    /// Timeout for fetching both documents of one resource
    pub task_timeout_secs: Option<u64>,
    /// Deadline for the whole fetch phase
    pub deadline_secs: Option<u64>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Tag label colours
    #[serde(default)]
    pub styles: StyleConfig,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::LOG_LEVEL.to_string()
}

/// Background colours for tag labels, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub domains: Option<String>,
    pub packages: Option<String>,
    pub default: Option<String>,
}

/// Values used when neither flags, environment nor TOML provide one
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const RESOURCE_LIST: &'static str = "cookbook_gallery.txt";
    pub const RAW_BASE_URL: &'static str = "https://raw.githubusercontent.com/ProjectPythia-MystMD";
    pub const BRANCH: &'static str = "main";
    pub const BOOK_BASE_URL: &'static str = "https://projectpythia-mystmd.github.io";
    pub const CONFIG_FILENAME: &'static str = "myst.yml";
    pub const GALLERY_FILENAME: &'static str = "_gallery_info.yml";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const TASK_TIMEOUT_SECS: u64 = 60;
    pub const DEADLINE_SECS: u64 = 300;
    pub const LOG_LEVEL: &'static str = "info";
    pub const DOMAINS_BACKGROUND: &'static str = "#7A77B4";
    pub const PACKAGES_BACKGROUND: &'static str = "#B83BC0";
    pub const DEFAULT_BACKGROUND: &'static str = "#4E66F6";

    /// Worker pool size: one per core plus headroom for I/O wait, capped at 32
    pub fn workers() -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        (cores + 4).min(32)
    }
}

/// Per-user config file (`~/.config/pythia/gallery.toml` on Linux)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pythia").join("gallery.toml"))
}

/// Find the config file to load
///
/// Priority:
/// 1. Explicit path (flag or `PYTHIA_GALLERY_CONFIG`); must exist
/// 2. `pythia-gallery.toml` in the working directory
/// 3. Per-user config file
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(user_config_path().filter(|p| p.is_file()))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Config file contents together with where they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    /// File that was read; `None` when no file was found
    pub path: Option<PathBuf>,
    pub toml: TomlConfig,
}

/// Locate and load the config file, falling back to an empty config
///
/// An explicit path that does not exist or does not parse is an error. When no
/// file is found at the implicit locations the defaults apply.
///
/// Nothing is logged here: the caller usually reads the log level from the
/// result before a subscriber exists.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    match locate_config_file(explicit)? {
        Some(path) => {
            let toml = load_toml_config(&path)?;
            Ok(LoadedConfig {
                path: Some(path),
                toml,
            })
        }
        None => Ok(LoadedConfig::default()),
    }
}
