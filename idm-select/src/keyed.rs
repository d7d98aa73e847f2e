//! Row identity for selection membership.

use std::fmt::Debug;
use std::hash::Hash;

/// A row whose selection membership is decided by a single key attribute.
///
/// Two rows with equal keys are the same row as far as selection is
/// concerned, whatever their other fields hold.
pub trait Keyed {
    type Key: Eq + Hash + Clone + Debug;

    fn key(&self) -> &Self::Key;
}

/// Rows with an empty string key cannot be selected.
pub fn has_nonempty_key<R>(row: &R) -> bool
where
    R: Keyed,
    R::Key: AsRef<str>,
{
    !row.key().as_ref().is_empty()
}
