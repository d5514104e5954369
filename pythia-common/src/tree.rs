//! Document-tree nodes
//!
//! Trees exchanged with the host renderer are mdast-style JSON: every node is
//! an object with a `type` tag, arbitrary properties and an optional ordered
//! `children` array. [`Node`] is the typed builder used to produce fragments;
//! incoming documents stay as [`serde_json::Value`] and are searched and
//! rewritten with [`find_all_by_type`] / [`replace_all_by_type`].
//!
//! Nodes are built bottom-up: children first, then the parent that owns them.
//! Nothing here mutates a node after it has been moved into a parent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single document-tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type tag (`"div"`, `"card"`, `"text"`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Every other property (`value`, `url`, `class`, `style`, ...)
    #[serde(flatten)]
    pub props: Map<String, Value>,
    /// Ordered children; `None` for leaf nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Leaf node without children
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
            children: None,
        }
    }

    /// Parent node owning `children`
    pub fn parent(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
            children: Some(children),
        }
    }

    /// Set a property
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    /// Set the `class` property to a list of class names
    pub fn with_class<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<Value> = classes
            .into_iter()
            .map(|c| Value::String(c.into()))
            .collect();
        self.with("class", Value::Array(classes))
    }

    /// Set the inline `style` property
    pub fn with_style(self, style: Value) -> Self {
        self.with("style", style)
    }

    /// Look up a property
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Children as a slice (empty for leaves)
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Serialize into a JSON value
    pub fn to_value(&self) -> Value {
        // Node only holds strings, maps and arrays, so serialization cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Builder helpers
// ============================================================================

/// Text leaf
pub fn text(value: impl Into<String>) -> Node {
    Node::leaf("text").with("value", value.into())
}

/// Image leaf
pub fn image(url: impl Into<String>) -> Node {
    Node::leaf("image").with("url", url.into())
}

/// Inline span
pub fn span(children: Vec<Node>) -> Node {
    Node::parent("span", children)
}

/// Block div
pub fn div(children: Vec<Node>) -> Node {
    Node::parent("div", children)
}

/// Raw HTML element (`{"type":"element","tag":..,"properties":{..}}`)
pub fn element(tag: &str, properties: Map<String, Value>) -> Node {
    Node::leaf("element")
        .with("tag", tag)
        .with("properties", Value::Object(properties))
}

/// Responsive grid; `columns` lists the column count per breakpoint, narrowest first
pub fn grid(columns: &[u32], children: Vec<Node>) -> Node {
    let columns: Vec<Value> = columns.iter().map(|&c| Value::from(c)).collect();
    Node::parent("grid", children).with("columns", Value::Array(columns))
}

/// Generic container
pub fn container(children: Vec<Node>) -> Node {
    Node::parent("container", children)
}

// ============================================================================
// Searching and rewriting JSON documents
// ============================================================================

fn is_type(value: &Value, kind: &str) -> bool {
    value.get("type").and_then(Value::as_str) == Some(kind)
}

/// Collect every node of type `kind`, depth-first in document order
///
/// Matching nodes are not searched further.
pub fn find_all_by_type<'a>(root: &'a Value, kind: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(root, kind, &mut found);
    found
}

fn collect<'a>(value: &'a Value, kind: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect(item, kind, found);
            }
        }
        Value::Object(map) => {
            if is_type(value, kind) {
                found.push(value);
                return;
            }
            if let Some(children) = map.get("children") {
                collect(children, kind, found);
            }
        }
        _ => {}
    }
}

/// Replace every node of type `kind` with a copy of `replacement`
///
/// Each match is cleared of all its previous properties and children. Returns
/// the number of nodes replaced.
pub fn replace_all_by_type(root: &mut Value, kind: &str, replacement: &Value) -> usize {
    match root {
        Value::Array(items) => items
            .iter_mut()
            .map(|item| replace_all_by_type(item, kind, replacement))
            .sum(),
        Value::Object(_) if is_type(root, kind) => {
            *root = replacement.clone();
            1
        }
        Value::Object(map) => match map.get_mut("children") {
            Some(children) => replace_all_by_type(children, kind, replacement),
            None => 0,
        },
        _ => 0,
    }
}
