//! Tree values and their classification
//!
//! Trees are plain [`serde_json::Value`]s with order-preserving maps; this module
//! decides how each value is displayed and how it is addressed.

pub mod load;
pub mod locate;
pub mod path;
pub mod shape;
pub mod snippet;

pub use load::{load_tree, load_tree_file, TreeFormat};
pub use locate::{locations_of_kind, Span};
pub use path::{DisplayPath, Segment};
pub use shape::{classify, is_tree_node, node_kind, Shape, TagKeys, DEFAULT_TAG_KEYS};
pub use snippet::{node_snippet, node_span, snippet};
