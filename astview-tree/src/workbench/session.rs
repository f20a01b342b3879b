//! Workbench session
//!
//! A [`Session`] owns the current source text, the rule text, the last good tree
//! and the last transformed output. Edits only arm the recompute debouncer;
//! [`Session::tick`] runs a single recompute once the input has been quiet.
//!
//! Failures never discard what is on screen: a failed parse keeps the previous
//! tree, and a failure message replaces the output only after its own, longer
//! quiet period, so half-typed input does not flash errors.

use super::collaborator::{Parser, Transformer};
use super::debounce::Debouncer;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Quiet periods of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    /// Wait after the last edit before recomputing
    pub debounce: Duration,
    /// Wait after a failed recompute before showing its error
    pub error_debounce: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        SessionTiming {
            debounce: Duration::from_millis(500),
            error_debounce: Duration::from_millis(750),
        }
    }
}

pub struct Session {
    parser: Box<dyn Parser>,
    transformer: Option<Box<dyn Transformer>>,
    source: String,
    rule: String,
    tree: Option<Value>,
    /// The source text `tree` was parsed from
    tree_source: Option<String>,
    output: Option<String>,
    error: Option<String>,
    pending_error: Option<String>,
    recompute: Debouncer,
    error_delay: Debouncer,
    generation: u64,
}

impl Session {
    pub fn new(
        parser: Box<dyn Parser>,
        transformer: Option<Box<dyn Transformer>>,
        source: String,
        rule: String,
        timing: SessionTiming,
    ) -> Self {
        Session {
            parser,
            transformer,
            source,
            rule,
            tree: None,
            tree_source: None,
            output: None,
            error: None,
            pending_error: None,
            recompute: Debouncer::new(timing.debounce),
            error_delay: Debouncer::new(timing.error_debounce),
            generation: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The last successfully parsed tree
    pub fn tree(&self) -> Option<&Value> {
        self.tree.as_ref()
    }

    /// The text the last good tree was parsed from.
    ///
    /// Differs from [`Session::source`] while an edit is pending or after a
    /// failed parse; tree offsets only index into this text.
    pub fn tree_source(&self) -> Option<&str> {
        self.tree_source.as_deref()
    }

    /// The last successfully transformed source
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// The error shown in place of the output, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_transformer(&self) -> bool {
        self.transformer.is_some()
    }

    /// Number of recomputes run so far; changes whenever the tree may have
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.recompute.is_pending()
    }

    /// Replace the source text and arm a recompute
    pub fn edit_source(&mut self, source: String, now: Instant) {
        self.source = source;
        self.recompute.input(now);
    }

    /// Replace the rule text and arm a recompute
    pub fn edit_rule(&mut self, rule: String, now: Instant) {
        self.rule = rule;
        self.recompute.input(now);
    }

    /// Advance timers; returns true when anything visible changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.recompute.poll(now) {
            self.recompute(now);
            changed = true;
        }
        if self.error_delay.poll(now) {
            if let Some(message) = self.pending_error.take() {
                self.error = Some(message);
                changed = true;
            }
        }
        changed
    }

    /// Parse and transform immediately, dropping any pending debounced run
    pub fn recompute(&mut self, now: Instant) {
        self.recompute.cancel();
        self.generation += 1;
        self.error = None;

        let mut problem = None;
        match self.parser.parse(&self.source) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.tree_source = Some(self.source.clone());
            }
            Err(err) => {
                tracing::warn!(error = %err, "parse failed, keeping last tree");
                problem = Some(err.to_string());
            }
        }

        if let Some(transformer) = &self.transformer {
            match transformer.transform(&self.source, &self.rule) {
                Ok(output) => self.output = Some(output),
                Err(err) => {
                    tracing::warn!(error = %err, "transform failed");
                    problem.get_or_insert_with(|| err.to_string());
                }
            }
        }

        match problem {
            None => {
                self.pending_error = None;
                self.error_delay.cancel();
            }
            Some(message) => {
                self.pending_error = Some(message);
                self.error_delay.input(now);
            }
        }
        tracing::debug!(
            generation = self.generation,
            has_tree = self.tree.is_some(),
            failed = self.pending_error.is_some(),
            "recomputed"
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("source_len", &self.source.len())
            .field("rule_len", &self.rule.len())
            .field("has_tree", &self.tree.is_some())
            .field("error", &self.error)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Accepts sources starting with `ok`, counting calls
    struct FakeParser {
        calls: Rc<Cell<usize>>,
    }

    impl Parser for FakeParser {
        fn parse(&self, source: &str) -> Result<Value, CollaboratorError> {
            self.calls.set(self.calls.get() + 1);
            if source.starts_with("ok") {
                Ok(json!({"type": "Program", "source": source}))
            } else {
                Err(CollaboratorError::Output("Unexpected token".to_string()))
            }
        }
    }

    /// Upper-cases sources the fake parser accepts
    struct Upper;

    impl Transformer for Upper {
        fn transform(&self, source: &str, _rule: &str) -> Result<String, CollaboratorError> {
            if source.starts_with("ok") {
                Ok(source.to_uppercase())
            } else {
                Err(CollaboratorError::Output("SyntaxError".to_string()))
            }
        }
    }

    fn session(calls: &Rc<Cell<usize>>) -> Session {
        Session::new(
            Box::new(FakeParser {
                calls: Rc::clone(calls),
            }),
            Some(Box::new(Upper)),
            "ok 1".to_string(),
            String::new(),
            SessionTiming::default(),
        )
    }

    #[test]
    fn burst_of_edits_recomputes_once() {
        let calls = Rc::new(Cell::new(0));
        let mut session = session(&calls);
        let start = Instant::now();
        for i in 0..5u64 {
            session.edit_source(format!("ok {}", i), start + Duration::from_millis(i * 100));
            assert!(!session.tick(start + Duration::from_millis(i * 100 + 50)));
        }
        assert!(session.tick(start + Duration::from_millis(900)));
        assert!(!session.tick(start + Duration::from_millis(2000)));
        assert_eq!(calls.get(), 1);
        assert_eq!(session.output(), Some("OK 4"));
    }

    #[test]
    fn failed_parse_keeps_last_tree_and_delays_error() {
        let calls = Rc::new(Cell::new(0));
        let mut session = session(&calls);
        let start = Instant::now();
        session.recompute(start);
        let good = session.tree().cloned();
        assert!(good.is_some());

        session.edit_source("var = ;".to_string(), start);
        session.tick(start + Duration::from_millis(500));
        assert_eq!(session.tree().cloned(), good);
        // Error not shown until its own quiet period passes
        assert_eq!(session.error(), None);
        assert!(session.tick(start + Duration::from_millis(1250)));
        assert_eq!(session.error(), Some("Unusable output: Unexpected token"));
        // Output of the last good transform is still there
        assert_eq!(session.output(), Some("OK 1"));
        // The kept tree is still paired with the text it came from
        assert_eq!(session.source(), "var = ;");
        assert_eq!(session.tree_source(), Some("ok 1"));
    }

    #[test]
    fn tree_source_follows_successful_parses_only() {
        let calls = Rc::new(Cell::new(0));
        let mut session = session(&calls);
        let start = Instant::now();
        assert_eq!(session.tree_source(), None);

        session.recompute(start);
        assert_eq!(session.tree_source(), Some("ok 1"));

        session.edit_source("ok 2".to_string(), start);
        assert_eq!(session.tree_source(), Some("ok 1"));
        session.tick(start + Duration::from_millis(500));
        assert_eq!(session.tree_source(), Some("ok 2"));
    }

    #[test]
    fn success_clears_pending_error() {
        let calls = Rc::new(Cell::new(0));
        let mut session = session(&calls);
        let start = Instant::now();
        session.edit_source("broken".to_string(), start);
        session.tick(start + Duration::from_millis(500));
        session.edit_source("ok again".to_string(), start + Duration::from_millis(600));
        session.tick(start + Duration::from_millis(1100));
        assert!(!session.tick(start + Duration::from_millis(3000)));
        assert_eq!(session.error(), None);
        assert_eq!(session.output(), Some("OK AGAIN"));
    }
}
