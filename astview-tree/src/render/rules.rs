//! Display rules
//!
//! One [`DisplayRules`] value is built per render root and passed by reference
//! through every recursive call. It never changes during a pass.

use crate::tree::shape::{is_tree_node, TagKeys};
use crate::tree::DisplayPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which fields of a node are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Every field, including offsets and the kind tag itself
    All,
    /// Child-node fields plus whitelisted primitive fields
    #[default]
    Filtered,
}

impl Variant {
    pub fn toggle(&self) -> Variant {
        match self {
            Variant::All => Variant::Filtered,
            Variant::Filtered => Variant::All,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::All => f.write_str("all"),
            Variant::Filtered => f.write_str("filtered"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "detail" => Ok(Variant::All),
            "filtered" | "node" => Ok(Variant::Filtered),
            other => Err(format!(
                "unknown variant '{}' (expected all or filtered)",
                other
            )),
        }
    }
}

/// Configuration bundle controlling what is shown and how
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRules {
    pub variant: Variant,
    /// Labels at a path length up to this value start open. Negative values
    /// start everything closed.
    pub initial_open_depth: i32,
    /// Field names shown under [`Variant::Filtered`] even when not nodes
    pub field_whitelist: BTreeSet<String>,
    /// Nodes of this kind are marked active
    pub active_kind: Option<String>,
    /// Text the tree was parsed from, for snippets
    pub source_text: Option<String>,
    pub tag_keys: TagKeys,
}

impl Default for DisplayRules {
    fn default() -> Self {
        DisplayRules {
            variant: Variant::default(),
            initial_open_depth: 0,
            field_whitelist: BTreeSet::new(),
            active_kind: None,
            source_text: None,
            tag_keys: TagKeys::default(),
        }
    }
}

impl DisplayRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_initial_open_depth(mut self, depth: i32) -> Self {
        self.initial_open_depth = depth;
        self
    }

    pub fn with_whitelist<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_whitelist = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_active_kind(mut self, kind: Option<impl Into<String>>) -> Self {
        self.active_kind = kind.map(Into::into);
        self
    }

    pub fn with_source_text(mut self, source: Option<impl Into<String>>) -> Self {
        self.source_text = source.map(Into::into);
        self
    }

    pub fn with_tag_keys(mut self, tags: TagKeys) -> Self {
        self.tag_keys = tags;
        self
    }

    /// Initial state of a label first rendered at `path`
    pub fn starts_open(&self, path: &DisplayPath) -> bool {
        i64::try_from(path.len()).unwrap_or(i64::MAX) <= i64::from(self.initial_open_depth)
    }

    pub fn is_active(&self, kind: &str) -> bool {
        self.active_kind.as_deref() == Some(kind)
    }

    /// Whether a field of a Tree Node is shown
    pub fn is_visible_field(&self, name: &str, value: &Value) -> bool {
        match self.variant {
            Variant::All => true,
            Variant::Filtered => {
                is_tree_node(value, &self.tag_keys) || self.field_whitelist.contains(name)
            }
        }
    }
}
