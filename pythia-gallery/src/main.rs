//! pythia-gallery - cookbook gallery plugin executable
//!
//! Modes (mutually exclusive):
//! - no flag: print the plugin description
//! - `--directive NAME`: expand the directive read from stdin
//! - `--transform STAGE`: fill gallery placeholders in the tree read from stdin
//!
//! JSON goes to stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use pythia_common::config::{load_config, CompiledDefaults, LoadedConfig, CONFIG_ENV_VAR};
use pythia_gallery::config::{ConfigOverrides, GallerySettings};
use pythia_gallery::plugin::{plugin_spec, run_directive, run_role};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments for pythia-gallery
#[derive(Parser, Debug)]
#[command(name = "pythia-gallery")]
#[command(about = "Pythia cookbook gallery plugin")]
#[command(version)]
#[command(group(ArgGroup::new("mode").args(["role", "directive", "transform"])))]
struct Args {
    /// Run a role (not provided by this plugin)
    #[arg(long)]
    role: Option<String>,

    /// Expand a directive read from stdin
    #[arg(long)]
    directive: Option<String>,

    /// Run the document transform on the tree read from stdin
    #[arg(long)]
    transform: Option<String>,

    /// Config file
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Resource list, one cookbook per line
    #[arg(long, env = "PYTHIA_GALLERY_RESOURCE_LIST")]
    resource_list: Option<PathBuf>,

    /// Base URL of the raw metadata documents
    #[arg(long, env = "PYTHIA_GALLERY_RAW_BASE_URL")]
    raw_base_url: Option<String>,

    /// Branch holding the metadata documents
    #[arg(long, env = "PYTHIA_GALLERY_BRANCH")]
    branch: Option<String>,

    /// Base URL of the published books
    #[arg(long, env = "PYTHIA_GALLERY_BOOK_BASE_URL")]
    book_base_url: Option<String>,

    /// Concurrent metadata fetches
    #[arg(long, env = "PYTHIA_GALLERY_WORKERS")]
    workers: Option<usize>,

    /// Timeout for a single HTTP request, in seconds
    #[arg(long, env = "PYTHIA_GALLERY_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Timeout for one cookbook (both documents), in seconds
    #[arg(long, env = "PYTHIA_GALLERY_TASK_TIMEOUT_SECS")]
    task_timeout_secs: Option<u64>,

    /// Deadline for the whole fetch phase, in seconds
    #[arg(long, env = "PYTHIA_GALLERY_DEADLINE_SECS")]
    deadline_secs: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            resource_list: self.resource_list.clone(),
            raw_base_url: self.raw_base_url.clone(),
            branch: self.branch.clone(),
            book_base_url: self.book_base_url.clone(),
            workers: self.workers,
            request_timeout_secs: self.request_timeout_secs,
            task_timeout_secs: self.task_timeout_secs,
            deadline_secs: self.deadline_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts because it carries the log level.
    // Only the transform uses settings, so only the transform fails on a bad file.
    let loaded = load_config(args.config.as_deref());
    let log_level = match &loaded {
        Ok(config) => config.toml.logging.level.clone(),
        Err(_) => CompiledDefaults::LOG_LEVEL.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting pythia-gallery v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &loaded {
        Ok(LoadedConfig {
            path: Some(path), ..
        }) => info!("Config file: {}", path.display()),
        Ok(LoadedConfig { path: None, .. }) => warn!("No config file found, using defaults"),
        Err(e) if args.transform.is_none() => warn!("Ignoring config file: {}", e),
        Err(_) => {}
    }

    if let Some(role) = &args.role {
        let data = read_stdin()?;
        run_role(role, &data)?;
        return Ok(());
    }

    if let Some(directive) = &args.directive {
        let data = read_stdin()?;
        let output = run_directive(directive, &data)?;
        return write_stdout(&output);
    }

    if let Some(stage) = &args.transform {
        let config = loaded.context("Failed to load config file")?;
        let settings = GallerySettings::resolve(&args.overrides(), &config.toml)
            .context("Invalid configuration")?;
        info!(
            stage = %stage,
            resource_list = %settings.resource_list.display(),
            workers = settings.workers,
            "Running gallery transform"
        );

        let document = read_stdin()?;
        let pipeline =
            pythia_gallery::build_pipeline(&settings).context("Failed to create HTTP client")?;
        let output = pipeline
            .transform(document, &settings.resource_list)
            .await
            .context("Gallery transform failed")?;
        return write_stdout(&output);
    }

    write_stdout(&plugin_spec())
}

fn read_stdin() -> Result<Value> {
    serde_json::from_reader(std::io::stdin().lock()).context("Failed to parse JSON from stdin")
}

fn write_stdout<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value).context("Failed to write JSON to stdout")?;
    stdout.flush()?;
    Ok(())
}
