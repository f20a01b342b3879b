//! Main application state and event handling
//!
//! The App struct brings together:
//! - Model (the application state)
//! - TreeViewer and RuleViewer (the UI components)
//! - Focus management (which viewer has keyboard focus)
//! - Global key handling (quit, focus switching, recompute, delegating to viewers)

use super::model::{Focus, Model};
use super::ruleviewer::RuleViewer;
use super::treeviewer::TreeViewer;
use super::viewer::{Viewer, ViewerEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// The main application
pub struct App {
    /// The model holding session, tree and expansion state
    pub model: Model,

    /// Tree viewer (shows the rendered tree)
    pub tree_viewer: TreeViewer,

    /// Rule viewer (shows the rule with a cursor)
    pub rule_viewer: RuleViewer,

    /// Which viewer currently has focus
    pub focus: Focus,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Shown in the title bar
    pub title: String,
}

impl App {
    /// Create a new application around a model
    pub fn new(model: Model, title: String) -> Self {
        App {
            model,
            tree_viewer: TreeViewer::new(),
            rule_viewer: RuleViewer::new(),
            focus: Focus::default(),
            should_quit: false,
            title,
        }
    }

    /// Toggle focus between viewers
    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Check for global keys (quit, focus, recompute)
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab => {
                self.toggle_focus();
                return true;
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.recompute(Instant::now());
                return true;
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.recompute(Instant::now());
                return true;
            }
            _ => {}
        }

        // Delegate to focused viewer
        let event = match self.focus {
            Focus::TreeViewer => self.tree_viewer.handle_key(key, &self.model),
            Focus::RuleViewer => self.rule_viewer.handle_key(key, &self.model),
        };

        // Process the event if there is one
        if let Some(event) = event {
            self.process_viewer_event(event)
        } else {
            false
        }
    }

    /// Run the debounced collaborators if their quiet period has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.model.tick(now)
    }

    /// Recompute immediately (Shift+Enter or `r`)
    pub fn recompute(&mut self, now: Instant) {
        self.model.recompute(now);
    }

    /// The rule file changed on disk
    pub fn rule_changed(&mut self, rule: String, now: Instant) {
        self.rule_viewer.clamp_to(&rule);
        let offset = self.rule_viewer.cursor_offset(&rule);
        self.model.edit_rule(rule, now);
        self.model.set_rule_cursor(offset);
    }

    /// Process a viewer event and update the model
    fn process_viewer_event(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::SelectRow(key) => {
                self.tree_viewer.select(key, &self.model);
                true
            }
            ViewerEvent::Toggle(key) => {
                let changed = self.model.toggle(&key);
                // Stay on the toggled label
                self.tree_viewer.select(key, &self.model);
                changed
            }
            ViewerEvent::ToggleVariant => {
                self.model.toggle_variant();
                true
            }
            ViewerEvent::MoveRuleCursor(offset) => {
                self.model.set_rule_cursor(offset);
                true
            }
            ViewerEvent::NoChange => false,
        }
    }
}
