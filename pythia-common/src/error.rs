//! Common error types for the Pythia gallery tooling

use thiserror::Error;

/// Common result type for Pythia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Pythia crates
#[derive(Error, Debug)]
pub enum Error {
    /// Config file missing, unreadable, malformed or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}
