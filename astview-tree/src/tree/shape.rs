//! Three-way classification of tree values
//!
//! A value is a Tree Node when it is a map carrying a string kind tag, a plain
//! aggregate when it has fields but no tag, and a primitive otherwise. Sequences
//! handed to the renderer directly behave like aggregates addressed by index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag keys inspected when no others are configured.
pub const DEFAULT_TAG_KEYS: [&str; 2] = ["type", "kind"];

/// Ordered list of field names that may carry a node's kind tag.
///
/// The first key present with a string value wins, so for a Babel
/// `VariableDeclaration` (which has both `type` and `kind: "var"`) the default
/// order picks `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagKeys(Vec<String>);

impl TagKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagKeys(keys.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The kind tag of a map, if it carries one
    pub fn tag_of<'a>(&self, fields: &'a Map<String, Value>) -> Option<&'a str> {
        self.iter()
            .find_map(|key| fields.get(key).and_then(Value::as_str))
    }
}

impl Default for TagKeys {
    fn default() -> Self {
        TagKeys::new(DEFAULT_TAG_KEYS)
    }
}

/// How a single value is displayed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// A tagged record: one syntactic construct
    Node {
        kind: &'a str,
        fields: &'a Map<String, Value>,
    },
    /// A map without a kind tag
    Aggregate(&'a Map<String, Value>),
    /// A sequence rendered in place of a node (e.g. an array nested in an array)
    Sequence(&'a [Value]),
    /// A leaf scalar
    Primitive(&'a Value),
}

/// Classify a value for rendering
pub fn classify<'a>(value: &'a Value, tags: &TagKeys) -> Shape<'a> {
    match value {
        Value::Object(fields) => match tags.tag_of(fields) {
            Some(kind) => Shape::Node { kind, fields },
            None => Shape::Aggregate(fields),
        },
        Value::Array(items) => Shape::Sequence(items),
        other => Shape::Primitive(other),
    }
}

/// The kind tag of a value, if it is a Tree Node
pub fn node_kind<'a>(value: &'a Value, tags: &TagKeys) -> Option<&'a str> {
    match value {
        Value::Object(fields) => tags.tag_of(fields),
        _ => None,
    }
}

/// Whether a field value counts as a child node.
///
/// True for a tagged map, or for a non-empty sequence whose *first* element is a
/// tagged map. Later elements are not inspected: a sequence is assumed to be
/// homogeneous, so `[1, {"type": "Identifier"}]` is not a node sequence while
/// `[{"type": "Identifier"}, 1]` is.
pub fn is_tree_node(value: &Value, tags: &TagKeys) -> bool {
    match value {
        Value::Array(items) => items
            .first()
            .is_some_and(|first| node_kind(first, tags).is_some()),
        other => node_kind(other, tags).is_some(),
    }
}
