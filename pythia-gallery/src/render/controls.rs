//! Tag filter controls
//!
//! One group per known category, each a bold heading followed by one
//! checkbox row per tag. The checkbox's `rel` attribute carries the tag; the
//! client-side filter script matches it against card classes.

use crate::styles::StyleTable;
use crate::tags::TagIndex;
use crate::types::{Category, KnownCategory};
use pythia_common::tree::{div, element, span, text, Node};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

/// Class of the wrapper around all filter groups
pub const FILTER_CONTROLS_CLASS: &str = "filter-controls";

/// Build the filter controls for every known category
pub fn render_controls(index: &TagIndex, styles: &StyleTable) -> Node {
    let groups = index
        .iter()
        .map(|(category, tags)| render_group(category, tags, styles))
        .collect();

    div(groups).with_class([FILTER_CONTROLS_CLASS])
}

fn render_group(category: KnownCategory, tags: &BTreeSet<String>, styles: &StyleTable) -> Node {
    let style = styles.for_category(Category::Known(category)).to_value();

    let heading =
        span(vec![text(category.filter_label())]).with_style(json!({"fontWeight": "bold"}));

    let children = std::iter::once(heading)
        .chain(tags.iter().map(|tag| checkbox_row(tag, &style)))
        .collect();

    div(children).with_class([category.key()])
}

fn checkbox_row(tag: &str, style: &Value) -> Node {
    let mut properties = Map::new();
    properties.insert("type".to_string(), Value::from("checkbox"));
    properties.insert("rel".to_string(), Value::from(tag));

    div(vec![element("input", properties), text(format!(" {}", tag))]).with_style(style.clone())
}
