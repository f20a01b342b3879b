//! The rendered structure
//!
//! A [`Visual`] mirrors what a UI shows: labeled nodes, field groups under them,
//! and the open/closed indicator of each toggle. Closed labels carry no children.

use super::expansion::ExpansionKey;
use crate::tree::DisplayPath;

/// Toggle state of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Nothing to expand
    Static,
    Open,
    Closed,
}

impl Toggle {
    pub fn from_open(open: bool) -> Toggle {
        if open {
            Toggle::Open
        } else {
            Toggle::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Toggle::Open)
    }

    pub fn is_toggleable(&self) -> bool {
        !matches!(self, Toggle::Static)
    }

    /// `-` when open, `+` when closed
    pub fn indicator(&self) -> Option<&'static str> {
        match self {
            Toggle::Static => None,
            Toggle::Open => Some("-"),
            Toggle::Closed => Some("+"),
        }
    }
}

/// Result of rendering one value
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// A primitive, or no tree at all
    Empty,
    /// A Tree Node with its label
    Node(NodeVisual),
    /// A plain aggregate: its field groups without a label of their own
    Fragment(Vec<GroupVisual>),
}

impl Visual {
    pub fn is_empty(&self) -> bool {
        match self {
            Visual::Empty => true,
            Visual::Fragment(groups) => groups.is_empty(),
            Visual::Node(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub path: DisplayPath,
    pub depth: usize,
    pub kind: String,
    pub toggle: Toggle,
    pub active: bool,
    pub snippet: Option<String>,
    /// Visible fields, in field order; empty while closed
    pub groups: Vec<GroupVisual>,
}

impl NodeVisual {
    pub fn key(&self) -> ExpansionKey {
        ExpansionKey::node(self.path.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupVisual {
    /// Path of the group itself (parent path plus the field name)
    pub path: DisplayPath,
    pub depth: usize,
    pub name: String,
    pub body: GroupBody,
}

impl GroupVisual {
    pub fn key(&self) -> ExpansionKey {
        ExpansionKey::group(self.path.clone())
    }

    pub fn toggle(&self) -> Toggle {
        match &self.body {
            GroupBody::Children { open, .. } => Toggle::from_open(*open),
            GroupBody::Literal(_) | GroupBody::Empty => Toggle::Static,
        }
    }
}

/// What a field group shows under its name
#[derive(Debug, Clone, PartialEq)]
pub enum GroupBody {
    /// A primitive or absent value, stringified
    Literal(String),
    /// A sequence with no elements
    Empty,
    /// Structural children; `items` is empty while closed
    Children {
        open: bool,
        count: usize,
        items: Vec<Visual>,
    },
}
