//! Depth-first flattening of a rendered tree into rows
//!
//! List-based views (the terminal tree pane, the text formatter) show one row per
//! label. Closed labels already have no children in the [`Visual`], so
//! flattening needs no access to the expansion store.

use super::expansion::{ExpansionKey, Role};
use super::visual::{GroupBody, GroupVisual, NodeVisual, Toggle, Visual};

/// One visible label
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: ExpansionKey,
    /// Nesting level of the label (0 for the root)
    pub level: usize,
    /// Node kind or field name
    pub label: String,
    /// Literal value of a primitive group (`[]` for an empty sequence)
    pub detail: Option<String>,
    pub toggle: Toggle,
    pub active: bool,
    pub snippet: Option<String>,
    /// Number of structural children of a group
    pub count: Option<usize>,
}

impl Row {
    pub fn role(&self) -> Role {
        self.key.role
    }
}

/// Flatten a visual into rows in display order
pub fn flatten(visual: &Visual) -> Vec<Row> {
    let mut rows = Vec::new();
    flatten_visual(visual, 0, &mut rows);
    rows
}

fn flatten_visual(visual: &Visual, level: usize, rows: &mut Vec<Row>) {
    match visual {
        Visual::Empty => {}
        Visual::Node(node) => flatten_node(node, level, rows),
        Visual::Fragment(groups) => {
            for group in groups {
                flatten_group(group, level, rows);
            }
        }
    }
}

fn flatten_node(node: &NodeVisual, level: usize, rows: &mut Vec<Row>) {
    rows.push(Row {
        key: node.key(),
        level,
        label: node.kind.clone(),
        detail: None,
        toggle: node.toggle,
        active: node.active,
        snippet: node.snippet.clone(),
        count: None,
    });
    for group in &node.groups {
        flatten_group(group, level + 1, rows);
    }
}

fn flatten_group(group: &GroupVisual, level: usize, rows: &mut Vec<Row>) {
    let (detail, count) = match &group.body {
        GroupBody::Literal(text) => (Some(text.clone()), None),
        GroupBody::Empty => (Some("[]".to_string()), Some(0)),
        GroupBody::Children { count, .. } => (None, Some(*count)),
    };
    rows.push(Row {
        key: group.key(),
        level,
        label: group.name.clone(),
        detail,
        toggle: group.toggle(),
        active: false,
        snippet: None,
        count,
    });
    if let GroupBody::Children { items, .. } = &group.body {
        for item in items {
            flatten_visual(item, level + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_root, DisplayRules, ExpansionStore};
    use serde_json::json;

    #[test]
    fn rows_follow_field_order() {
        let tree = json!({
            "type": "BinaryExpression",
            "left": {"type": "Identifier", "name": "a"},
            "operator": "+",
            "right": {"type": "Identifier", "name": "b"}
        });
        let rules = DisplayRules::new()
            .with_initial_open_depth(3)
            .with_whitelist(["name", "operator"]);
        let mut store = ExpansionStore::new();
        let rows = flatten(&render_root(Some(&tree), &rules, &mut store));
        let labels: Vec<(usize, &str)> = rows.iter().map(|r| (r.level, r.label.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                (0, "BinaryExpression"),
                (1, "left"),
                (2, "Identifier"),
                (3, "name"),
                (1, "operator"),
                (1, "right"),
                (2, "Identifier"),
                (3, "name"),
            ]
        );
        assert_eq!(rows[4].detail.as_deref(), Some("\"+\""));
        assert_eq!(rows[1].role(), Role::Group);
        assert_eq!(rows[2].role(), Role::Node);
    }

    #[test]
    fn empty_sequence_row_is_static() {
        let tree = json!({"type": "FunctionDeclaration", "params": []});
        let rules = DisplayRules::new()
            .with_variant(crate::render::Variant::All)
            .with_initial_open_depth(1);
        let mut store = ExpansionStore::new();
        let rows = flatten(&render_root(Some(&tree), &rules, &mut store));
        let params = rows.iter().find(|r| r.label == "params").unwrap();
        assert_eq!(params.toggle, Toggle::Static);
        assert_eq!(params.detail.as_deref(), Some("[]"));
        assert_eq!(params.count, Some(0));
    }
}
