//! Reconciliation of two sequences into positional update operations.
//!
//! Unlike [`crate::edit`], items are compared through two predicates: one says
//! whether two entries are the same item, the other whether that item's content
//! is unchanged. The divide-and-conquer Myers search finds matching runs, an
//! optional pass pairs removals with insertions of the same item as moves, and
//! [`DiffResult::dispatch_to`] replays the outcome as a stream of operations
//! that can be applied one after another to the old sequence.
//!
//! # Example
//!
//! ```
//! use seqdiff::reconcile::{reconcile, UpdateOp};
//!
//! let old = ["a", "b", "c"];
//! let new = ["c", "a", "b"];
//! let result = reconcile(&old, &new, |a, b| a == b, |a, b| a == b, true);
//! assert_eq!(result.updates(), vec![UpdateOp::Moved { from: 2, to: 0 }]);
//! ```

mod batch;
mod result;
mod snake;

use std::fmt;

use serde::Serialize;
use tracing::debug;

pub use batch::BatchDispatcher;
pub use result::DiffResult;

use crate::error::ReconcileError;

/// Position-based access to the two sequences being reconciled.
///
/// Both predicates must be deterministic for the duration of the diff.
/// `same_content` is only asked about pairs for which `same_identity` held.
pub trait ItemComparator {
    /// Length of the old sequence.
    fn old_len(&self) -> usize;

    /// Length of the new sequence.
    fn new_len(&self) -> usize;

    /// Whether the two positions hold the same logical item.
    fn same_identity(&self, old_position: usize, new_position: usize) -> bool;

    /// Whether the item's visible content is unchanged.
    fn same_content(&self, old_position: usize, new_position: usize) -> bool;
}

/// An [`ItemComparator`] over two slices and a pair of closures.
pub struct SliceComparator<'a, T, I, C> {
    old: &'a [T],
    new: &'a [T],
    same_identity: I,
    same_content: C,
}

impl<'a, T, I, C> SliceComparator<'a, T, I, C>
where
    I: Fn(&T, &T) -> bool,
    C: Fn(&T, &T) -> bool,
{
    /// Creates a comparator from two slices and the identity/content predicates.
    pub const fn new(old: &'a [T], new: &'a [T], same_identity: I, same_content: C) -> Self {
        Self {
            old,
            new,
            same_identity,
            same_content,
        }
    }
}

impl<T, I, C> ItemComparator for SliceComparator<'_, T, I, C>
where
    I: Fn(&T, &T) -> bool,
    C: Fn(&T, &T) -> bool,
{
    fn old_len(&self) -> usize {
        self.old.len()
    }

    fn new_len(&self) -> usize {
        self.new.len()
    }

    fn same_identity(&self, old_position: usize, new_position: usize) -> bool {
        (self.same_identity)(&self.old[old_position], &self.new[new_position])
    }

    fn same_content(&self, old_position: usize, new_position: usize) -> bool {
        (self.same_content)(&self.old[old_position], &self.new[new_position])
    }
}

/// Receives update operations in application order.
///
/// Every position is relative to the sequence as it stands after all earlier
/// operations have been applied.
pub trait UpdateCallback {
    /// `count` items were inserted at `position`.
    fn on_inserted(&mut self, position: usize, count: usize);

    /// `count` items were removed starting at `position`.
    fn on_removed(&mut self, position: usize, count: usize);

    /// The item at `from_position` moved to `to_position`.
    fn on_moved(&mut self, from_position: usize, to_position: usize);

    /// `count` items starting at `position` changed content.
    fn on_changed(&mut self, position: usize, count: usize);
}

/// A single update operation, as recorded by [`DiffResult::updates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UpdateOp {
    /// `count` items inserted at `position`.
    Inserted {
        /// Insertion point.
        position: usize,
        /// Number of items inserted.
        count: usize,
    },
    /// `count` items removed starting at `position`.
    Removed {
        /// First removed position.
        position: usize,
        /// Number of items removed.
        count: usize,
    },
    /// One item moved.
    Moved {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// `count` items starting at `position` changed content.
    Changed {
        /// First changed position.
        position: usize,
        /// Number of items changed.
        count: usize,
    },
}

impl fmt::Display for UpdateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inserted { position, count } => write!(f, "inserted {count} at {position}"),
            Self::Removed { position, count } => write!(f, "removed {count} at {position}"),
            Self::Moved { from, to } => write!(f, "moved {from} to {to}"),
            Self::Changed { position, count } => write!(f, "changed {count} at {position}"),
        }
    }
}

impl UpdateCallback for Vec<UpdateOp> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.push(UpdateOp::Inserted { position, count });
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.push(UpdateOp::Removed { position, count });
    }

    fn on_moved(&mut self, from_position: usize, to_position: usize) {
        self.push(UpdateOp::Moved {
            from: from_position,
            to: to_position,
        });
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.push(UpdateOp::Changed { position, count });
    }
}

/// Reconciles the sequences behind `comparator`.
///
/// # Errors
///
/// Returns [`ReconcileError::NoMiddleSnake`] when the bidirectional search
/// cannot complete, which only happens with a non-deterministic comparator.
pub fn try_reconcile_with<C>(comparator: &C, detect_moves: bool) -> Result<DiffResult, ReconcileError>
where
    C: ItemComparator + ?Sized,
{
    let snakes = snake::collect_snakes(comparator)?;
    debug!(
        old_len = comparator.old_len(),
        new_len = comparator.new_len(),
        snakes = snakes.len(),
        detect_moves,
        "reconciled sequences"
    );
    Ok(DiffResult::new(comparator, snakes, detect_moves))
}

/// Reconciles the sequences behind `comparator`.
///
/// # Panics
///
/// Panics if the comparator is inconsistent; see [`try_reconcile_with`].
#[must_use]
pub fn reconcile_with<C>(comparator: &C, detect_moves: bool) -> DiffResult
where
    C: ItemComparator + ?Sized,
{
    match try_reconcile_with(comparator, detect_moves) {
        Ok(result) => result,
        Err(err) => panic!("{err}"),
    }
}

/// Reconciles two slices using the given identity and content predicates.
///
/// # Panics
///
/// Panics if either predicate is non-deterministic; see [`try_reconcile_with`].
#[must_use]
pub fn reconcile<T, I, C>(
    old: &[T],
    new: &[T],
    same_identity: I,
    same_content: C,
    detect_moves: bool,
) -> DiffResult
where
    I: Fn(&T, &T) -> bool,
    C: Fn(&T, &T) -> bool,
{
    reconcile_with(
        &SliceComparator::new(old, new, same_identity, same_content),
        detect_moves,
    )
}
