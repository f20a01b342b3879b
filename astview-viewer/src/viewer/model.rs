//! Data model for the workbench
//!
//! The Model struct holds the application state that outlives a frame:
//! - The workbench session (source, rule, last good tree, output, error)
//! - The expansion store, owned here and reused by every render pass
//! - The display settings and the active kind
//! - The rows of the latest render, for the tree pane
//!
//! Everything visible in the tree pane is recomputed by [`Model::refresh`] from
//! the session's tree, so the model can be tested without a terminal.

use astview_tree::render::{render_root, ExpansionKey, ExpansionStore};
use astview_tree::tree::{locations_of_kind, Span};
use astview_tree::workbench::{active_kind_at, Session};
use astview_tree::{flatten, DisplayRules, Row, Variant};
use std::time::Instant;

/// Which viewer currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Tree pane has focus
    #[default]
    TreeViewer,
    /// Rule pane (cursor drives the active kind) has focus
    RuleViewer,
}

impl Focus {
    /// Toggle focus to the other viewer
    pub fn toggle(&self) -> Focus {
        match self {
            Focus::TreeViewer => Focus::RuleViewer,
            Focus::RuleViewer => Focus::TreeViewer,
        }
    }
}

/// The core data model
pub struct Model {
    session: Session,
    /// Display settings without the per-render active kind and source text
    settings: DisplayRules,
    store: ExpansionStore,
    rows: Vec<Row>,
    active_kind: Option<String>,
}

impl Model {
    /// Create a model over a session; the tree pane stays empty until it has a tree
    pub fn new(session: Session, settings: DisplayRules) -> Self {
        let mut model = Model {
            session,
            settings,
            store: ExpansionStore::new(),
            rows: Vec::new(),
            active_kind: None,
        };
        model.refresh();
        model
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn variant(&self) -> Variant {
        self.settings.variant
    }

    pub fn active_kind(&self) -> Option<&str> {
        self.active_kind.as_deref()
    }

    /// Index of the row carrying `key` in the latest render
    pub fn row_index(&self, key: &ExpansionKey) -> Option<usize> {
        self.rows.iter().position(|row| &row.key == key)
    }

    /// Flip one label; returns false for keys without state (static labels)
    pub fn toggle(&mut self, key: &ExpansionKey) -> bool {
        match self.store.toggle(key) {
            Some(open) => {
                tracing::debug!(key = %key.path, ?open, "toggled");
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn toggle_variant(&mut self) {
        self.settings.variant = self.settings.variant.toggle();
        self.refresh();
    }

    /// Set the active kind; returns whether it changed
    pub fn set_active_kind(&mut self, kind: Option<String>) -> bool {
        if self.active_kind == kind {
            return false;
        }
        tracing::debug!(kind = ?kind, "active kind");
        self.active_kind = kind;
        self.refresh();
        true
    }

    /// Derive the active kind from a cursor position in the rule text
    pub fn set_rule_cursor(&mut self, offset: usize) -> bool {
        let kind = active_kind_at(self.session.rule(), offset);
        self.set_active_kind(kind)
    }

    /// Source spans of the active kind's nodes in the last good tree
    pub fn active_locations(&self) -> Vec<Span> {
        match (self.session.tree(), self.active_kind.as_deref()) {
            (Some(tree), Some(kind)) => locations_of_kind(tree, kind, &self.settings.tag_keys),
            _ => Vec::new(),
        }
    }

    /// Spans to highlight in the source pane.
    ///
    /// Empty while the shown source is not the text the tree was parsed from,
    /// since the tree's offsets do not index into it.
    pub fn source_highlights(&self) -> Vec<Span> {
        if self.session.tree_source() == Some(self.session.source()) {
            self.active_locations()
        } else {
            Vec::new()
        }
    }

    pub fn edit_source(&mut self, source: String, now: Instant) {
        self.session.edit_source(source, now);
    }

    pub fn edit_rule(&mut self, rule: String, now: Instant) {
        self.session.edit_rule(rule, now);
    }

    /// Advance the session timers; returns true when the screen needs redrawing
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.session.tick(now);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Recompute now, skipping the debounce
    pub fn recompute(&mut self, now: Instant) {
        self.session.recompute(now);
        self.refresh();
    }

    /// Re-render the last good tree against the current settings
    pub fn refresh(&mut self) {
        let rules = self
            .settings
            .clone()
            .with_active_kind(self.active_kind.clone())
            .with_source_text(self.session.tree_source());
        let visual = render_root(self.session.tree(), &rules, &mut self.store);
        self.rows = flatten(&visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astview_tree::tree::TreeFormat;
    use astview_tree::workbench::{SessionTiming, TreeFileParser};
    use astview_tree::{DisplayPath, Toggle};
    use std::time::Duration;

    const TREE: &str = r#"{"type": "Program", "body": [{"type": "Identifier", "name": "a", "start": 0, "end": 1}]}"#;
    const SPANNED: &str = r#"{"type":"Program","start":0,"end":8}"#;

    fn model() -> Model {
        let session = Session::new(
            Box::new(TreeFileParser::new(TreeFormat::Json)),
            None,
            TREE.to_string(),
            String::new(),
            SessionTiming::default(),
        );
        let settings = DisplayRules::new()
            .with_initial_open_depth(0)
            .with_whitelist(["name"]);
        let mut model = Model::new(session, settings);
        model.recompute(Instant::now());
        model
    }

    #[test]
    fn renders_after_recompute() {
        let model = model();
        let labels: Vec<&str> = model.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Program", "body"]);
        assert_eq!(model.rows()[1].toggle, Toggle::Closed);
    }

    #[test]
    fn toggle_opens_group() {
        let mut model = model();
        let body = ExpansionKey::group(DisplayPath::root().field("body"));
        assert!(model.toggle(&body));
        assert_eq!(model.rows().len(), 3);
        assert_eq!(model.row_index(&body), Some(1));
    }

    #[test]
    fn static_labels_do_not_toggle() {
        let mut model = model();
        let missing = ExpansionKey::node(DisplayPath::root().field("nothing"));
        assert!(!model.toggle(&missing));
    }

    #[test]
    fn variant_switch_shows_all_fields() {
        let mut model = model();
        model.toggle_variant();
        assert_eq!(model.variant(), Variant::All);
        assert_eq!(model.rows()[1].label, "type");
    }

    #[test]
    fn active_kind_highlights_locations() {
        let mut model = model();
        assert!(model.set_active_kind(Some("Identifier".to_string())));
        assert!(!model.set_active_kind(Some("Identifier".to_string())));
        assert_eq!(model.active_locations(), vec![Span { start: 0, end: 1 }]);
    }

    #[test]
    fn snippets_follow_the_parsed_text_after_a_failed_edit() {
        let session = Session::new(
            Box::new(TreeFileParser::new(TreeFormat::Json)),
            None,
            SPANNED.to_string(),
            String::new(),
            SessionTiming::default(),
        );
        let start = Instant::now();
        let mut model = Model::new(session, DisplayRules::new());
        model.recompute(start);
        assert_eq!(model.rows()[0].snippet.as_deref(), Some("{\"type\":"));
        model.set_active_kind(Some("Program".to_string()));
        assert_eq!(model.source_highlights(), vec![Span { start: 0, end: 8 }]);

        model.edit_source("XXXXXXXXXXXX broken".to_string(), start);
        // Pending edit: the shown text no longer matches the tree
        assert!(model.source_highlights().is_empty());
        assert!(model.tick(start + Duration::from_millis(500)));
        assert!(model.session().tree().is_some());
        assert_eq!(model.rows()[0].snippet.as_deref(), Some("{\"type\":"));
        assert!(model.source_highlights().is_empty());
        assert_eq!(model.active_locations(), vec![Span { start: 0, end: 8 }]);
    }
}
