//! # astview-tree
//!
//! Rendering model for parsed syntax trees.
//!
//! The trees handled here come from an external parser and are self-describing:
//! every syntactic construct is a map carrying a kind tag (`type` or `kind`), with
//! arbitrary named fields holding other nodes, sequences of nodes, or primitives.
//! Nothing in this crate knows the set of node kinds ahead of time.
//!
//! Layout
//!
//! src/
//!   ├── tree        Classification, display paths, snippets, loading
//!   ├── render      Display rules, expansion store, the recursive renderer
//!   ├── formats     Text output of a rendered tree
//!   └── workbench   Debounced recompute of tree and transformed output
//!
//! A render pass takes a root value, an immutable [`DisplayRules`](render::DisplayRules)
//! and a caller-owned [`ExpansionStore`](render::ExpansionStore), and produces a
//! [`Visual`](render::Visual). Open/closed state lives in the store keyed by display
//! path, so it survives the tree being rebuilt after every edit.

pub mod error;
pub mod formats;
pub mod render;
pub mod tree;
pub mod workbench;

pub use error::{CollaboratorError, TreeError};
pub use formats::to_text;
pub use render::{
    flatten, render_root, DisplayRules, ExpansionKey, ExpansionStore, Role, Row, Toggle, Variant,
    Visual,
};
pub use tree::{DisplayPath, Segment, Shape, TagKeys};
