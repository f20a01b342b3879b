//! The edit / recompute loop around a tree
//!
//! The parser and the transformer are external collaborators behind the
//! [`Parser`] and [`Transformer`] traits. A [`Session`] debounces edits and runs
//! exactly one recompute after each quiet period, keeping the last good tree
//! when a recompute fails.

pub mod active;
pub mod collaborator;
pub mod debounce;
pub mod session;

pub use active::active_kind_at;
pub use collaborator::{CommandParser, CommandTransformer, Parser, TreeFileParser, Transformer};
pub use debounce::Debouncer;
pub use session::{Session, SessionTiming};
