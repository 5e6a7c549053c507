//! Expand / collapse state for the tree view.

use super::normalize::{SegmentTable, SEPARATOR};
use super::tree::RegistryTree;
use std::collections::BTreeSet;

/// The set of expanded node paths.
///
/// Paths are compared case-insensitively so that a user-typed
/// `hklm\software` matches the node `HKLM\SOFTWARE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given paths expanded.
    pub fn with_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::new();
        for path in paths {
            state.expand(path.as_ref());
        }
        state
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(&path.to_lowercase())
    }

    pub fn expand(&mut self, path: &str) {
        self.expanded.insert(path.to_lowercase());
    }

    pub fn collapse(&mut self, path: &str) {
        self.expanded.remove(&path.to_lowercase());
    }

    /// Flip one node; returns whether it is now expanded.
    pub fn toggle(&mut self, path: &str) -> bool {
        let key = path.to_lowercase();
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    /// Expand a node and every ancestor so it becomes visible.
    ///
    /// `path` is normalized with `table` first.
    pub fn reveal(&mut self, path: &str, table: &SegmentTable) {
        let mut prefix = String::new();
        for segment in table.segments(path) {
            if !prefix.is_empty() {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(&segment);
            self.expand(&prefix);
        }
    }

    /// Expand every node of the tree.
    pub fn expand_all(&mut self, tree: &RegistryTree) {
        for path in tree.all_paths() {
            self.expand(&path);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
