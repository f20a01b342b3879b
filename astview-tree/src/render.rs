//! Rendering a tree into expandable label groups
//!
//! - [`rules`]     the immutable per-render configuration
//! - [`expansion`] the keyed open/closed store that outlives render passes
//! - [`renderer`]  node-kind and child-group dispatch
//! - [`visual`]    the produced structure
//! - [`flatten`]   depth-first rows for list display and navigation

pub mod expansion;
pub mod flatten;
pub mod renderer;
pub mod rules;
pub mod visual;

pub use expansion::{ExpansionKey, ExpansionStore, Role};
pub use flatten::{flatten, Row};
pub use renderer::{literal, render, render_group, render_root};
pub use rules::{DisplayRules, Variant};
pub use visual::{GroupBody, GroupVisual, NodeVisual, Toggle, Visual};
