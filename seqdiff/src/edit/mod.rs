//! Edit scripts between two ordered sequences.
//!
//! This module computes the shortest list of [`Edit`] operations that turns an
//! old sequence into a new one, comparing elements by value equality. It is the
//! engine behind "why do these two collections differ" explanations.
//!
//! # Example
//!
//! ```
//! use seqdiff::edit::{Edit, compute_edit_script};
//!
//! let script = compute_edit_script(&[1, 3], &[1, 2, 3]);
//! assert_eq!(script[1], Edit::Insert { new_index: 1, new_value: &2 });
//! ```

mod myers;

use serde::Serialize;

pub use myers::{compute_edit_script, edit_distance};

/// A single entry of an edit script.
///
/// Concatenating the old values of `Equal` and `Delete` entries reproduces the
/// old sequence; concatenating the new values of `Equal` and `Insert` entries
/// reproduces the new sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit<T> {
    /// Element present and unchanged in both sequences.
    Equal {
        /// Index in the old sequence.
        old_index: usize,
        /// Value in the old sequence.
        old_value: T,
        /// Index in the new sequence.
        new_index: usize,
        /// Value in the new sequence.
        new_value: T,
    },
    /// Element only present in the new sequence.
    Insert {
        /// Index in the new sequence.
        new_index: usize,
        /// Value in the new sequence.
        new_value: T,
    },
    /// Element only present in the old sequence.
    Delete {
        /// Index in the old sequence.
        old_index: usize,
        /// Value in the old sequence.
        old_value: T,
    },
}

impl<T> Edit<T> {
    /// Returns the index in the old sequence, if this entry touches it.
    #[must_use]
    pub const fn old_index(&self) -> Option<usize> {
        match self {
            Self::Equal { old_index, .. } | Self::Delete { old_index, .. } => Some(*old_index),
            Self::Insert { .. } => None,
        }
    }

    /// Returns the index in the new sequence, if this entry touches it.
    #[must_use]
    pub const fn new_index(&self) -> Option<usize> {
        match self {
            Self::Equal { new_index, .. } | Self::Insert { new_index, .. } => Some(*new_index),
            Self::Delete { .. } => None,
        }
    }

    /// Returns the value from the old sequence, if any.
    #[must_use]
    pub const fn old_value(&self) -> Option<&T> {
        match self {
            Self::Equal { old_value, .. } | Self::Delete { old_value, .. } => Some(old_value),
            Self::Insert { .. } => None,
        }
    }

    /// Returns the value from the new sequence, if any.
    #[must_use]
    pub const fn new_value(&self) -> Option<&T> {
        match self {
            Self::Equal { new_value, .. } | Self::Insert { new_value, .. } => Some(new_value),
            Self::Delete { .. } => None,
        }
    }

    /// Returns true if this entry is an insertion or a deletion.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }

    /// The index a change is reported at: the new index for insertions,
    /// the old index otherwise.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Equal { old_index, .. } | Self::Delete { old_index, .. } => *old_index,
            Self::Insert { new_index, .. } => *new_index,
        }
    }

    /// Maps the carried values, keeping indices untouched.
    pub fn map<U, F>(self, mut f: F) -> Edit<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::Equal {
                old_index,
                old_value,
                new_index,
                new_value,
            } => Edit::Equal {
                old_index,
                old_value: f(old_value),
                new_index,
                new_value: f(new_value),
            },
            Self::Insert {
                new_index,
                new_value,
            } => Edit::Insert {
                new_index,
                new_value: f(new_value),
            },
            Self::Delete {
                old_index,
                old_value,
            } => Edit::Delete {
                old_index,
                old_value: f(old_value),
            },
        }
    }
}

impl<T: Clone> Edit<&T> {
    /// Converts a borrowed edit into one owning its values.
    #[must_use]
    pub fn cloned(self) -> Edit<T> {
        self.map(Clone::clone)
    }
}

/// Keeps only insertions and deletions, ordered by [`Edit::position`].
///
/// The sort is stable, so a deletion and an insertion reported at the same
/// index keep their script order (deletion first).
#[must_use]
pub fn changes<T: Clone>(script: &[Edit<T>]) -> Vec<Edit<T>> {
    let mut changes: Vec<Edit<T>> = script.iter().filter(|e| e.is_change()).cloned().collect();
    changes.sort_by_key(Edit::position);
    changes
}
