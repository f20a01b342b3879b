//! Expansion state
//!
//! Open/closed flags are stored per [`ExpansionKey`] (display path plus role) in
//! an [`ExpansionStore`] owned by the caller and handed to every render pass.
//! Entries are created the first time a key is rendered, seeded from the rules,
//! and dropped by [`ExpansionStore::end_pass`] once a pass no longer renders
//! them (a collapsed ancestor, or a node removed from the tree).

use crate::tree::DisplayPath;
use std::collections::HashMap;

/// What kind of label a key belongs to.
///
/// A field holding a single node puts the group and the node at the same path,
/// so the role keeps their flags apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// A Tree Node label (its kind)
    Node,
    /// A Field Group label (a field name)
    Group,
}

/// Identity of a toggle-able label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpansionKey {
    pub role: Role,
    pub path: DisplayPath,
}

impl ExpansionKey {
    pub fn node(path: DisplayPath) -> Self {
        ExpansionKey {
            role: Role::Node,
            path,
        }
    }

    pub fn group(path: DisplayPath) -> Self {
        ExpansionKey {
            role: Role::Group,
            path,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    open: bool,
    /// Pass in which the key was last rendered
    seen: u64,
}

/// Keyed store of open/closed flags
#[derive(Debug, Clone, Default)]
pub struct ExpansionStore {
    entries: HashMap<ExpansionKey, Entry>,
    pass: u64,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render pass
    pub fn begin_pass(&mut self) {
        self.pass += 1;
    }

    /// Look up the flag for a rendered key, seeding it on first render
    pub fn is_open(&mut self, key: &ExpansionKey, seed: impl FnOnce() -> bool) -> bool {
        let pass = self.pass;
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.seen = pass;
                entry.open
            }
            None => {
                let open = seed();
                self.entries.insert(key.clone(), Entry { open, seen: pass });
                open
            }
        }
    }

    /// Current flag of a key without marking it rendered
    pub fn peek(&self, key: &ExpansionKey) -> Option<bool> {
        self.entries.get(key).map(|entry| entry.open)
    }

    /// Flip a rendered key's flag, returning the new state.
    ///
    /// Keys that were never rendered have no state to flip.
    pub fn toggle(&mut self, key: &ExpansionKey) -> Option<bool> {
        let entry = self.entries.get_mut(key)?;
        entry.open = !entry.open;
        Some(entry.open)
    }

    /// Force a rendered key open or closed
    pub fn set_open(&mut self, key: &ExpansionKey, open: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.open = open;
                true
            }
            None => false,
        }
    }

    /// Finish a render pass, dropping keys it did not render.
    ///
    /// Returns how many entries were dropped.
    pub fn end_pass(&mut self) -> usize {
        let pass = self.pass;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.seen == pass);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::trace!(dropped, remaining = self.entries.len(), "swept expansion state");
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open/closed flags as a sorted snapshot
    pub fn snapshot(&self) -> Vec<(ExpansionKey, bool)> {
        let mut flags: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.open))
            .collect();
        flags.sort();
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ExpansionKey {
        ExpansionKey::node(DisplayPath::root().field(name))
    }

    #[test]
    fn seeds_once_then_remembers() {
        let mut store = ExpansionStore::new();
        store.begin_pass();
        assert!(store.is_open(&key("a"), || true));
        // A later seed is ignored
        assert!(store.is_open(&key("a"), || false));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_flips_only_that_key() {
        let mut store = ExpansionStore::new();
        store.begin_pass();
        store.is_open(&key("a"), || false);
        store.is_open(&key("b"), || false);
        assert_eq!(store.toggle(&key("a")), Some(true));
        assert_eq!(store.peek(&key("a")), Some(true));
        assert_eq!(store.peek(&key("b")), Some(false));
    }

    #[test]
    fn toggle_unknown_key_is_none() {
        let mut store = ExpansionStore::new();
        assert_eq!(store.toggle(&key("missing")), None);
        assert!(!store.set_open(&key("missing"), true));
    }

    #[test]
    fn roles_are_distinct_keys() {
        let mut store = ExpansionStore::new();
        let path = DisplayPath::root().field("id");
        store.begin_pass();
        store.is_open(&ExpansionKey::group(path.clone()), || true);
        store.is_open(&ExpansionKey::node(path.clone()), || false);
        assert_eq!(store.peek(&ExpansionKey::group(path.clone())), Some(true));
        assert_eq!(store.peek(&ExpansionKey::node(path)), Some(false));
    }

    #[test]
    fn end_pass_drops_unrendered_keys() {
        let mut store = ExpansionStore::new();
        store.begin_pass();
        store.is_open(&key("a"), || false);
        store.is_open(&key("b"), || false);
        store.toggle(&key("a"));
        assert_eq!(store.end_pass(), 0);

        store.begin_pass();
        assert!(store.is_open(&key("a"), || false));
        assert_eq!(store.end_pass(), 1);
        assert_eq!(store.peek(&key("b")), None);
        assert_eq!(store.peek(&key("a")), Some(true));
    }
}
