//! Finding the source spans of every node of a kind
//!
//! Used to highlight the active kind's occurrences in the source text.

use super::shape::TagKeys;
use super::snippet::node_span;
use serde_json::Value;

/// A character range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Spans of all nodes whose kind is `kind`, in pre-order.
///
/// Nodes lacking `start`/`end` offsets are skipped; their children are still
/// searched.
pub fn locations_of_kind(tree: &Value, kind: &str, tags: &TagKeys) -> Vec<Span> {
    let mut spans = Vec::new();
    collect(tree, kind, tags, &mut spans);
    spans
}

fn collect(value: &Value, kind: &str, tags: &TagKeys, spans: &mut Vec<Span>) {
    match value {
        Value::Object(fields) => {
            if tags.tag_of(fields) == Some(kind) {
                if let (Some(start), Some(end)) = node_span(fields) {
                    if start <= end {
                        spans.push(Span { start, end });
                    }
                }
            }
            for child in fields.values() {
                collect(child, kind, tags, spans);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, kind, tags, spans);
            }
        }
        _ => {}
    }
}
