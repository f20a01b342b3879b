//! The recursive renderer
//!
//! [`render`] dispatches on the shape of a value: a Tree Node gets a label and
//! (when open) one field group per visible field; a plain aggregate contributes
//! its field groups directly; a primitive renders nothing. [`render_group`]
//! normalizes a field value into its structural children or a literal.
//!
//! Rules are passed explicitly into every call; expansion flags are looked up in
//! the store as labels are reached, so only rendered keys get state.

use super::expansion::{ExpansionKey, ExpansionStore};
use super::rules::DisplayRules;
use super::visual::{GroupBody, GroupVisual, NodeVisual, Toggle, Visual};
use crate::tree::shape::{classify, Shape};
use crate::tree::snippet::node_snippet;
use crate::tree::DisplayPath;
use serde_json::{Map, Value};

/// Literal shown for a field with no value
pub const UNDEFINED_LITERAL: &str = "undefined";

/// Render a root as one complete pass over the store.
///
/// Keys not reached by this pass are dropped from the store afterwards. A
/// missing root (e.g. the parser failed before any tree existed) renders
/// nothing.
pub fn render_root(
    root: Option<&Value>,
    rules: &DisplayRules,
    store: &mut ExpansionStore,
) -> Visual {
    store.begin_pass();
    let visual = match root {
        Some(root) => render(root, &DisplayPath::root(), 0, rules, store),
        None => Visual::Empty,
    };
    store.end_pass();
    tracing::trace!(entries = store.len(), "rendered tree");
    visual
}

/// Render one value at `path`
pub fn render(
    node: &Value,
    path: &DisplayPath,
    depth: usize,
    rules: &DisplayRules,
    store: &mut ExpansionStore,
) -> Visual {
    match classify(node, &rules.tag_keys) {
        Shape::Node { kind, fields } => {
            Visual::Node(render_node(kind, fields, path, depth, rules, store))
        }
        Shape::Aggregate(fields) => Visual::Fragment(
            fields
                .iter()
                .map(|(name, value)| {
                    group_at(path.field(name), name, Some(value), depth + 1, rules, store)
                })
                .collect(),
        ),
        Shape::Sequence(items) => Visual::Fragment(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    let name = index.to_string();
                    group_at(path.index(index), &name, Some(value), depth + 1, rules, store)
                })
                .collect(),
        ),
        Shape::Primitive(_) => Visual::Empty,
    }
}

/// Render the field `name` of the value at `path`.
///
/// `value` is `None` when the field is absent.
pub fn render_group(
    name: &str,
    value: Option<&Value>,
    path: &DisplayPath,
    depth: usize,
    rules: &DisplayRules,
    store: &mut ExpansionStore,
) -> GroupVisual {
    group_at(path.field(name), name, value, depth, rules, store)
}

/// Canonical literal form of a primitive: its JSON text
pub fn literal(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED_LITERAL.to_string(),
        Some(value) => value.to_string(),
    }
}

fn render_node(
    kind: &str,
    fields: &Map<String, Value>,
    path: &DisplayPath,
    depth: usize,
    rules: &DisplayRules,
    store: &mut ExpansionStore,
) -> NodeVisual {
    let visible: Vec<(&String, &Value)> = fields
        .iter()
        .filter(|(name, value)| rules.is_visible_field(name, value))
        .collect();

    let toggle = if visible.is_empty() {
        Toggle::Static
    } else {
        let key = ExpansionKey::node(path.clone());
        Toggle::from_open(store.is_open(&key, || rules.starts_open(path)))
    };

    let snippet = rules
        .source_text
        .as_deref()
        .and_then(|source| node_snippet(source, fields))
        .map(str::to_owned);

    let groups = if toggle.is_open() {
        visible
            .into_iter()
            .map(|(name, value)| {
                group_at(path.field(name), name, Some(value), depth + 1, rules, store)
            })
            .collect()
    } else {
        Vec::new()
    };

    NodeVisual {
        path: path.clone(),
        depth,
        kind: kind.to_string(),
        toggle,
        active: rules.is_active(kind),
        snippet,
        groups,
    }
}

/// Render a group whose own path is `own`
fn group_at(
    own: DisplayPath,
    name: &str,
    value: Option<&Value>,
    depth: usize,
    rules: &DisplayRules,
    store: &mut ExpansionStore,
) -> GroupVisual {
    let body = match value {
        Some(Value::Array(items)) if items.is_empty() => GroupBody::Empty,
        Some(Value::Array(items)) => {
            let count = items.len();
            let open = group_open(&own, rules, store);
            let items = if open {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| render(item, &own.index(index), depth + 1, rules, store))
                    .collect()
            } else {
                Vec::new()
            };
            GroupBody::Children {
                open,
                count,
                items,
            }
        }
        Some(object @ Value::Object(_)) => {
            let open = group_open(&own, rules, store);
            let items = if open {
                vec![render(object, &own, depth + 1, rules, store)]
            } else {
                Vec::new()
            };
            GroupBody::Children {
                open,
                count: 1,
                items,
            }
        }
        primitive => GroupBody::Literal(literal(primitive)),
    };

    GroupVisual {
        path: own,
        depth,
        name: name.to_string(),
        body,
    }
}

fn group_open(own: &DisplayPath, rules: &DisplayRules, store: &mut ExpansionStore) -> bool {
    store.is_open(&ExpansionKey::group(own.clone()), || rules.starts_open(own))
}
