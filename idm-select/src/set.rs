//! Ordered, key-unique set of selected rows.

use crate::keyed::Keyed;
use std::collections::HashSet;

/// Rows the user has selected, in selection order, unique by key.
#[derive(Debug, Clone)]
pub struct SelectionSet<R: Keyed> {
    rows: Vec<R>,
    keys: HashSet<R::Key>,
}

impl<R: Keyed> Default for SelectionSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Keyed> SelectionSet<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            keys: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: &R) -> bool {
        self.keys.contains(row.key())
    }

    pub fn contains_key(&self, key: &R::Key) -> bool {
        self.keys.contains(key)
    }

    /// Insert a row unless its key is already present. Returns whether the
    /// row was added.
    pub fn insert(&mut self, row: R) -> bool {
        if self.keys.contains(row.key()) {
            return false;
        }
        self.keys.insert(row.key().clone());
        self.rows.push(row);
        true
    }

    pub fn remove_key(&mut self, key: &R::Key) -> Option<R> {
        if !self.keys.remove(key) {
            return None;
        }
        let index = self.rows.iter().position(|row| row.key() == key)?;
        Some(self.rows.remove(index))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.keys.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn keys(&self) -> impl Iterator<Item = &R::Key> {
        self.rows.iter().map(Keyed::key)
    }

    pub fn key_set(&self) -> &HashSet<R::Key> {
        &self.keys
    }

    /// Drop every selected row whose key is no longer in `universe`.
    ///
    /// Selections are never pruned implicitly; containers call this after a
    /// mutation that can shrink the universe. Returns the number removed.
    pub fn reconcile(&mut self, universe: &[R]) -> usize {
        let live: HashSet<&R::Key> = universe.iter().map(Keyed::key).collect();
        let before = self.rows.len();
        self.rows.retain(|row| live.contains(row.key()));
        if self.rows.len() != before {
            self.keys = self.rows.iter().map(|row| row.key().clone()).collect();
        }
        before - self.rows.len()
    }
}

impl<R: Keyed + Clone> SelectionSet<R> {
    /// Replace the whole selection, keeping the first row seen for each key.
    pub fn replace_with<'a, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        self.clear();
        for row in rows {
            self.insert(row.clone());
        }
    }
}

impl<'a, R: Keyed> IntoIterator for &'a SelectionSet<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
