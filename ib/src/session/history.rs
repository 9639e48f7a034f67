//! Append-only turn history

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Turn;

/// Ordered, append-only log of turns
///
/// Cloning is cheap and every snapshot is immutable: [`History::append`]
/// returns a new history and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    turns: Arc<[Turn]>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self { turns: Arc::from(Vec::new()) }
    }

    /// Return a new history with `turn` appended
    pub fn append(&self, turn: Turn) -> Self {
        let turns: Vec<Turn> = self.turns.iter().cloned().chain(std::iter::once(turn)).collect();
        Self { turns: turns.into() }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
