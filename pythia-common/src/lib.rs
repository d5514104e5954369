//! # Pythia Common Library
//!
//! Shared code for the Pythia gallery tooling:
//! - Error type shared by every crate in the workspace
//! - TOML configuration loading and layered resolution
//! - Document-tree nodes and builder helpers (mdast-style JSON)

pub mod config;
pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::Node;
