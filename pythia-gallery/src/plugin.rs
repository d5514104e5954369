//! Plugin description and directive handling
//!
//! The host calls the executable without arguments to learn what it
//! provides, then calls it with `--directive` while parsing and with
//! `--transform` once the document tree is complete.

use crate::error::{GalleryError, GalleryResult};
use crate::transform::PLACEHOLDER_TYPE;
use serde::Serialize;
use serde_json::{json, Value};

pub const PLUGIN_NAME: &str = "Pythia Gallery";
pub const DIRECTIVE_DOC: &str = "An example directive for embedding a Pythia cookbook gallery.";
pub const TRANSFORM_STAGE: &str = "document";

/// Plugin description document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSpec {
    pub name: &'static str,
    pub directives: Vec<DirectiveSpec>,
    pub transforms: Vec<TransformSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveSpec {
    pub name: &'static str,
    pub doc: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformSpec {
    pub stage: &'static str,
}

pub fn plugin_spec() -> PluginSpec {
    PluginSpec {
        name: PLUGIN_NAME,
        directives: vec![DirectiveSpec {
            name: PLACEHOLDER_TYPE,
            doc: DIRECTIVE_DOC,
        }],
        transforms: vec![TransformSpec {
            stage: TRANSFORM_STAGE,
        }],
    }
}

/// Expand a directive into its placeholder node
///
/// The placeholder is filled in later by the document transform.
pub fn run_directive(name: &str, _data: &Value) -> GalleryResult<Value> {
    if name != PLACEHOLDER_TYPE {
        return Err(GalleryError::UnknownDirective(name.to_string()));
    }
    Ok(json!([{ "type": PLACEHOLDER_TYPE, "children": [] }]))
}

/// Roles are not provided by this plugin
pub fn run_role(name: &str, _data: &Value) -> GalleryResult<Value> {
    Err(GalleryError::RoleUnsupported(name.to_string()))
}
