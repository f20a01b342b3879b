//! Display paths
//!
//! A [`DisplayPath`] locates a rendered label relative to the tree root as a
//! sequence of field names and sequence indices, e.g. `declarations.0.id`. It is
//! the identity key for expansion state: it stays the same when the tree is
//! re-parsed with fresh values, unlike any reference into the tree.

use std::fmt;

/// One step of a display path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A named field of a node or aggregate
    Field(String),
    /// A position in a sequence
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Path from the root to a rendered node or field group
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayPath {
    segments: Vec<Segment>,
}

impl DisplayPath {
    /// The root path (no segments)
    pub fn root() -> Self {
        DisplayPath::default()
    }

    pub fn new(segments: Vec<Segment>) -> Self {
        DisplayPath { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Extend with a field name
    pub fn field(&self, name: impl Into<String>) -> DisplayPath {
        self.child(Segment::Field(name.into()))
    }

    /// Extend with a sequence index
    pub fn index(&self, index: usize) -> DisplayPath {
        self.child(Segment::Index(index))
    }

    pub fn child(&self, segment: Segment) -> DisplayPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        DisplayPath { segments }
    }

    /// The parent path, or None for the root
    pub fn parent(&self) -> Option<DisplayPath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(DisplayPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Whether `self` is `other` or lies below it
    pub fn starts_with(&self, other: &DisplayPath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Dot-joined key, empty for the root
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DisplayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_segments() {
        let path = DisplayPath::root().field("declarations").index(0).field("id");
        assert_eq!(path.key(), "declarations.0.id");
        assert_eq!(path.len(), 3);
        assert_eq!(DisplayPath::root().key(), "");
    }

    #[test]
    fn parent_walks_up_to_root() {
        let path = DisplayPath::root().field("body").index(2);
        let parent = path.parent().unwrap();
        assert_eq!(parent, DisplayPath::root().field("body"));
        let root = parent.parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn field_and_index_segments_differ() {
        // Same key string, different identity
        let by_field = DisplayPath::root().field("params").field("0");
        let by_index = DisplayPath::root().field("params").index(0);
        assert_eq!(by_field.key(), by_index.key());
        assert_ne!(by_field, by_index);
    }

    #[test]
    fn starts_with_prefix() {
        let base = DisplayPath::root().field("body");
        let deep = base.index(0).field("id");
        assert!(deep.starts_with(&base));
        assert!(!base.starts_with(&deep));
        assert!(deep.starts_with(&DisplayPath::root()));
    }
}
