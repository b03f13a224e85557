//! Greedy Myers shortest-edit-script computation.
//!
//! Myers' algorithm runs in O((N+M)·D) time, where D is the number of
//! differences. For every edit count `d` it records the furthest `x` reached on
//! each diagonal; once a diagonal reaches the end of both sequences the recorded
//! frontiers are walked backwards to recover the operations.

use tracing::trace;

use super::Edit;
use crate::klines::KLines;

/// Computes the edit script that turns `old` into `new`.
///
/// Deletions are emitted before insertions at the same alignment point, and
/// identical sequences produce only `Equal` entries.
#[must_use]
pub fn compute_edit_script<'a, T: PartialEq>(old: &'a [T], new: &'a [T]) -> Vec<Edit<&'a T>> {
    let trace = shortest_edit_trace(old, new);
    let script = backtrack(old, new, &trace);
    trace!(
        old_len = old.len(),
        new_len = new.len(),
        distance = trace.len().saturating_sub(1),
        "computed edit script"
    );
    script
}

/// Returns the number of insertions plus deletions in the shortest edit script.
///
/// Only the frontier is kept, so memory stays O(N+M).
#[must_use]
pub fn edit_distance<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    let (n, m) = (old.len() as isize, new.len() as isize);
    let max = n + m;
    if max == 0 {
        return 0;
    }
    let mut v = KLines::new(max as usize + 1);
    for d in 0..=max {
        for k in (-d..=d).step_by(2) {
            let x = furthest_step(&v, d, k);
            let x = slide(old, new, x, x - k);
            v[k] = x;
            if x >= n && x - k >= m {
                return d as usize;
            }
        }
    }
    max as usize
}

/// Runs the forward search, keeping a snapshot of the frontier before each `d`.
fn shortest_edit_trace<T: PartialEq>(old: &[T], new: &[T]) -> Vec<KLines> {
    let (n, m) = (old.len() as isize, new.len() as isize);
    let max = n + m;
    if max == 0 {
        return Vec::new();
    }
    let mut v = KLines::new(max as usize + 1);
    let mut trace = Vec::new();
    for d in 0..=max {
        trace.push(v.clone());
        for k in (-d..=d).step_by(2) {
            let x = furthest_step(&v, d, k);
            let x = slide(old, new, x, x - k);
            v[k] = x;
            if x >= n && x - k >= m {
                return trace;
            }
        }
    }
    trace
}

/// Picks the neighbouring diagonal that reached further and steps off it.
///
/// Coming down from `k + 1` is an insertion; coming right from `k - 1` is a deletion.
fn furthest_step(v: &KLines, d: isize, k: isize) -> isize {
    if k == -d || (k != d && v[k - 1] < v[k + 1]) {
        v[k + 1]
    } else {
        v[k - 1] + 1
    }
}

/// Follows the diagonal while elements match.
fn slide<T: PartialEq>(old: &[T], new: &[T], mut x: isize, mut y: isize) -> isize {
    while x < old.len() as isize && y < new.len() as isize && old[x as usize] == new[y as usize] {
        x += 1;
        y += 1;
    }
    x
}

fn backtrack<'a, T>(old: &'a [T], new: &'a [T], trace: &[KLines]) -> Vec<Edit<&'a T>> {
    let mut script = Vec::new();
    let (mut x, mut y) = (old.len() as isize, new.len() as isize);

    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && v[k - 1] < v[k + 1]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[prev_k];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            let (i, j) = ((x - 1) as usize, (y - 1) as usize);
            script.push(Edit::Equal {
                old_index: i,
                old_value: &old[i],
                new_index: j,
                new_value: &new[j],
            });
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            if x == prev_x {
                let j = prev_y as usize;
                script.push(Edit::Insert {
                    new_index: j,
                    new_value: &new[j],
                });
            } else {
                let i = prev_x as usize;
                script.push(Edit::Delete {
                    old_index: i,
                    old_value: &old[i],
                });
            }
        }

        x = prev_x;
        y = prev_y;
    }

    script.reverse();
    script
}
