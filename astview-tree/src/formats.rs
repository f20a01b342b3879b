//! Output formats for rendered trees

pub mod text;

pub use text::{row_text, to_text};
