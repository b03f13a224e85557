//! Seqdiff - sequence diff and reconciliation engine.
//!
//! This crate computes the difference between two ordered sequences and renders
//! it for humans. It provides a greedy Myers edit-script computer, a
//! divide-and-conquer reconciler with move detection and batched update
//! dispatch, and a compactor that isolates the differing middle of two strings.

#![warn(clippy::pedantic)]

/// Shortest edit scripts by value equality.
pub mod edit;
/// Error types.
pub mod error;
/// Settings and telemetry used by the command-line tool.
pub mod infrastructure;
/// Identity-based reconciliation with move detection.
pub mod reconcile;
/// Assertion-style failure messages.
pub mod report;
/// Shared prefix/suffix compaction of two strings.
pub mod text;

mod klines;

pub use edit::{Edit, compute_edit_script, edit_distance};
pub use error::ReconcileError;
pub use reconcile::{DiffResult, ItemComparator, UpdateCallback, UpdateOp, reconcile};
pub use text::{CompactedDiff, compact_diff};
