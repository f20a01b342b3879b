//! Active kind from the rule editor's cursor
//!
//! Rules are visitor objects keyed by node kind:
//!
//! ```text
//! visitor: {
//!   VariableDeclaration(path) { ... }
//! }
//! ```
//!
//! The kind whose handler the cursor sits in is the last CamelCase word between
//! the `visitor: {` marker and the cursor.

use once_cell::sync::Lazy;
use regex::Regex;

const VISITOR_MARKER: &str = "visitor: {";

static KIND_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z0-9]+)+").expect("static regex is valid"));

/// The node kind named before the cursor, if any.
///
/// `offset` counts characters from the start of the rule text and is clamped to
/// its length.
pub fn active_kind_at(rule: &str, offset: usize) -> Option<String> {
    let end = rule
        .char_indices()
        .nth(offset)
        .map_or(rule.len(), |(index, _)| index);
    let before_cursor = &rule[..end];
    let handlers = before_cursor.split(VISITOR_MARKER).nth(1)?;
    KIND_NAME
        .find_iter(handlers)
        .last()
        .map(|found| found.as_str().to_string())
}
