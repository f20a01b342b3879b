//! Source snippets
//!
//! Nodes may carry `start`/`end` offsets into the text they were parsed from.
//! Offsets count UTF-16 code units, as JavaScript parsers report them, and
//! slicing degrades to "no snippet" instead of panicking when the offsets and
//! the text disagree.

use serde_json::{Map, Value};

/// Slice `source[start..end]` by UTF-16 offsets.
///
/// `end` is clamped to the text length. An offset inside a surrogate pair moves
/// to the next character. Missing offsets, `start > end`, or a
/// `start` past the end of the text yield `None`.
pub fn snippet(source: &str, start: Option<usize>, end: Option<usize>) -> Option<&str> {
    let (start, end) = (start?, end?);
    if start > end {
        return None;
    }
    let begin = byte_offset(source, start)?;
    let finish = byte_offset(source, end).unwrap_or(source.len());
    Some(&source[begin..finish])
}

/// The `(start, end)` offsets of a node, where present and non-negative
pub fn node_span(fields: &Map<String, Value>) -> (Option<usize>, Option<usize>) {
    let offset = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    };
    (offset("start"), offset("end"))
}

/// The snippet a node corresponds to
pub fn node_snippet<'s>(source: &'s str, fields: &Map<String, Value>) -> Option<&'s str> {
    let (start, end) = node_span(fields);
    snippet(source, start, end)
}

/// Byte index of the first character at or after UTF-16 offset `units`
fn byte_offset(source: &str, units: usize) -> Option<usize> {
    let mut position = 0;
    for (index, ch) in source.char_indices() {
        if position >= units {
            return Some(index);
        }
        position += ch.len_utf16();
    }
    (position >= units).then_some(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_statement() {
        assert_eq!(
            snippet("var a = 10;", Some(0), Some(11)),
            Some("var a = 10;")
        );
    }

    #[test]
    fn inner_range() {
        assert_eq!(snippet("var a = 10;", Some(4), Some(5)), Some("a"));
        assert_eq!(snippet("var a = 10;", Some(4), Some(4)), Some(""));
    }

    #[test]
    fn end_is_clamped() {
        assert_eq!(snippet("a + b", Some(4), Some(99)), Some("b"));
    }

    #[test]
    fn invalid_ranges_have_no_snippet() {
        assert_eq!(snippet("a + b", Some(3), Some(1)), None);
        assert_eq!(snippet("a + b", Some(9), Some(12)), None);
        assert_eq!(snippet("a + b", None, Some(1)), None);
        assert_eq!(snippet("", Some(0), Some(0)), Some(""));
    }

    #[test]
    fn offsets_count_utf16_units() {
        let source = "let é = \"ü\";";
        assert_eq!(snippet(source, Some(4), Some(5)), Some("é"));
        assert_eq!(snippet(source, Some(8), Some(11)), Some("\"ü\""));

        // The emoji takes two units, as in a Babel tree of this source
        let source = "let s = \"😀\"; x";
        assert_eq!(snippet(source, Some(8), Some(12)), Some("\"😀\""));
        assert_eq!(snippet(source, Some(14), Some(15)), Some("x"));
        assert_eq!(snippet(source, Some(15), Some(15)), Some(""));
        assert_eq!(snippet(source, Some(16), Some(16)), None);
    }

    #[test]
    fn offset_inside_surrogate_pair_moves_forward() {
        assert_eq!(snippet("😀a", Some(1), Some(3)), Some("a"));
    }

    #[test]
    fn node_offsets_are_read_from_fields() {
        let node = json!({"type": "Identifier", "start": 4, "end": 5});
        let fields = node.as_object().unwrap();
        assert_eq!(node_span(fields), (Some(4), Some(5)));
        assert_eq!(node_snippet("var a = 10;", fields), Some("a"));

        let node = json!({"type": "Identifier", "start": -1, "end": "x"});
        assert_eq!(node_span(node.as_object().unwrap()), (None, None));
    }
}
