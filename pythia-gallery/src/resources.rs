//! Resource list loading

use crate::error::{GalleryError, GalleryResult};
use std::path::Path;

/// Parse a resource list: one identifier per line
///
/// Surrounding whitespace is trimmed and blank lines are skipped. Order is
/// kept and duplicates are not removed.
pub fn parse_resource_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse the resource list at `path`
pub fn load_resource_list(path: &Path) -> GalleryResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| GalleryError::ResourceList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_resource_list(&content))
}
