//! Error types for the reconciliation engine.

use thiserror::Error;

/// Errors raised while reconciling two sequences.
///
/// None of these are retryable: they signal a comparator that is not
/// deterministic, and running the diff again cannot repair that.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The bidirectional search found no meeting point of the forward and
    /// backward frontiers that lies inside the range and advances the path.
    #[error(
        "no middle snake for old[{old_start}..{old_end}] / new[{new_start}..{new_end}]; \
         make sure the identity comparison is deterministic and the data is not \
         changing during the diff"
    )]
    NoMiddleSnake {
        /// Start of the unsolved range in the old sequence.
        old_start: usize,
        /// End of the unsolved range in the old sequence (exclusive).
        old_end: usize,
        /// Start of the unsolved range in the new sequence.
        new_start: usize,
        /// End of the unsolved range in the new sequence (exclusive).
        new_end: usize,
    },
}
