//! Indented text format
//!
//! One line per visible label, two spaces per level of nesting:
//!
//! ```text
//! VariableDeclaration -
//!   declarations -
//!     VariableDeclarator -
//!       id -
//!         *Identifier -
//!           name: "a"
//!       init +
//! ```
//!
//! Toggle-able labels end in `-` (open) or `+` (closed); active nodes are
//! prefixed with `*`; primitive groups show `name: <literal>`.

use crate::render::{flatten, Row, Visual};

/// Format a rendered tree as indented text
pub fn to_text(visual: &Visual) -> String {
    let mut output = String::new();
    for row in flatten(visual) {
        output.push_str(&"  ".repeat(row.level));
        output.push_str(&row_text(&row));
        output.push('\n');
    }
    output
}

/// The text of a single row, without indentation
pub fn row_text(row: &Row) -> String {
    let marker = if row.active { "*" } else { "" };
    match (&row.detail, row.toggle.indicator()) {
        (Some(detail), _) => format!("{}{}: {}", marker, row.label, detail),
        (None, Some(indicator)) => format!("{}{} {}", marker, row.label, indicator),
        (None, None) => format!("{}{}", marker, row.label),
    }
}
