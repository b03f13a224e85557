//! Divide-and-conquer Myers search for matching runs.
//!
//! Each [`Range`] is solved by a bidirectional search that stops at the middle
//! snake. The snake splits the range in two and both halves go back on an
//! explicit work stack, so call-stack depth stays constant whatever the input.

use tracing::error;

use super::ItemComparator;
use crate::error::ReconcileError;
use crate::klines::KLines;

/// A diagonal run of matching items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snake {
    /// Position in the old sequence.
    pub x: usize,
    /// Position in the new sequence.
    pub y: usize,
    /// Number of matches. Only the root snake is empty.
    pub size: usize,
}

impl Snake {
    pub(crate) const fn root() -> Self {
        Self {
            x: 0,
            y: 0,
            size: 0,
        }
    }

    pub(crate) const fn end_x(&self) -> usize {
        self.x + self.size
    }

    pub(crate) const fn end_y(&self) -> usize {
        self.y + self.size
    }
}

/// The path segment where the two searches met: at most one insertion or
/// removal plus the diagonal slide the meeting pass walked, in range-local
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MiddleSnake {
    start_x: isize,
    start_y: isize,
    end_x: isize,
    end_y: isize,
    /// Found by the backward pass, so the step sits after the slide.
    reverse: bool,
}

impl MiddleSnake {
    /// The matching run inside the segment, in global coordinates.
    fn diagonal(&self, range: &Range) -> Snake {
        let width = self.end_x - self.start_x;
        let height = self.end_y - self.start_y;
        let (x, y) = if width == height || self.reverse {
            (self.start_x, self.start_y)
        } else if height > width {
            (self.start_x, self.start_y + 1)
        } else {
            (self.start_x + 1, self.start_y)
        };
        Snake {
            x: range.old_start + x as usize,
            y: range.new_start + y as usize,
            size: width.min(height) as usize,
        }
    }

    /// Whether the segment lies inside a range of the given size and advances
    /// the path. Only an inconsistent comparator breaks either condition.
    const fn is_sound(&self, old_size: isize, new_size: isize) -> bool {
        0 <= self.start_x
            && self.start_x <= self.end_x
            && self.end_x <= old_size
            && 0 <= self.start_y
            && self.start_y <= self.end_y
            && self.end_y <= new_size
            && (self.start_x != self.end_x || self.start_y != self.end_y)
    }
}

/// A rectangular sub-problem awaiting a middle snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    pub old_start: usize,
    pub old_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

/// Forward and backward frontiers, allocated once per diff and reused by every range.
struct Frontiers {
    forward: KLines,
    backward: KLines,
}

/// Finds every non-empty snake between the two sequences, sorted by `(x, y)`.
pub(crate) fn collect_snakes<C>(comparator: &C) -> Result<Vec<Snake>, ReconcileError>
where
    C: ItemComparator + ?Sized,
{
    let old_len = comparator.old_len();
    let new_len = comparator.new_len();
    let reach = old_len + new_len + 1;
    let mut frontiers = Frontiers {
        forward: KLines::new(reach),
        backward: KLines::new(reach),
    };

    let mut snakes = Vec::new();
    let mut stack = vec![Range {
        old_start: 0,
        old_end: old_len,
        new_start: 0,
        new_end: new_len,
    }];

    while let Some(mut range) = stack.pop() {
        let Some(middle) = find_middle_snake(comparator, &range, &mut frontiers)? else {
            continue;
        };
        let diagonal = middle.diagonal(&range);
        if diagonal.size > 0 {
            snakes.push(diagonal);
        }

        stack.push(Range {
            old_start: range.old_start,
            old_end: range.old_start + middle.start_x as usize,
            new_start: range.new_start,
            new_end: range.new_start + middle.start_y as usize,
        });
        // The right half reuses the popped range.
        range.old_start += middle.end_x as usize;
        range.new_start += middle.end_y as usize;
        stack.push(range);
    }

    snakes.sort_unstable_by_key(|s| (s.x, s.y));
    Ok(snakes)
}

/// Runs the bidirectional search on one range and returns the segment where
/// the two passes meet, or `None` when the range is empty in either dimension.
///
/// The forward frontier holds the furthest `x` per diagonal `k = x - y`
/// measured from the range start; the backward one holds the smallest `x` per
/// diagonal measured from the range end, `k = (old_size - x) - (new_size - y)`.
fn find_middle_snake<C>(
    comparator: &C,
    range: &Range,
    frontiers: &mut Frontiers,
) -> Result<Option<MiddleSnake>, ReconcileError>
where
    C: ItemComparator + ?Sized,
{
    if range.old_end <= range.old_start || range.new_end <= range.new_start {
        return Ok(None);
    }
    let old_size = (range.old_end - range.old_start) as isize;
    let new_size = (range.new_end - range.new_start) as isize;
    let same = |x: isize, y: isize| {
        comparator.same_identity(range.old_start + x as usize, range.new_start + y as usize)
    };

    let Frontiers { forward, backward } = frontiers;
    let delta = old_size - new_size;
    let d_limit = (old_size + new_size + 1) / 2;
    forward[1] = 0;
    backward[1] = old_size;
    let check_in_forward = delta % 2 != 0;

    let mut found = None;
    'search: for d in 0..=d_limit {
        for k in (-d..=d).step_by(2) {
            // Step from whichever neighbour got further, then slide.
            let (start_x, mut x) = if k == -d || (k != d && forward[k + 1] > forward[k - 1]) {
                (forward[k + 1], forward[k + 1])
            } else {
                (forward[k - 1], forward[k - 1] + 1)
            };
            let mut y = x - k;
            let start_y = if d == 0 || x != start_x { y } else { y - 1 };
            while x < old_size && y < new_size && same(x, y) {
                x += 1;
                y += 1;
            }
            forward[k] = x;

            let backward_k = delta - k;
            if check_in_forward
                && backward_k >= -d + 1
                && backward_k <= d - 1
                && backward[backward_k] <= x
            {
                found = Some(MiddleSnake {
                    start_x,
                    start_y,
                    end_x: x,
                    end_y: y,
                    reverse: false,
                });
                break 'search;
            }
        }

        for k in (-d..=d).step_by(2) {
            let (start_x, mut x) = if k == -d || (k != d && backward[k + 1] < backward[k - 1]) {
                (backward[k + 1], backward[k + 1])
            } else {
                (backward[k - 1], backward[k - 1] - 1)
            };
            let mut y = new_size - (old_size - x - k);
            let start_y = if d == 0 || x != start_x { y } else { y + 1 };
            while x > 0 && y > 0 && same(x - 1, y - 1) {
                x -= 1;
                y -= 1;
            }
            backward[k] = x;

            let forward_k = delta - k;
            if !check_in_forward
                && forward_k >= -d
                && forward_k <= d
                && forward[forward_k] >= x
            {
                found = Some(MiddleSnake {
                    start_x: x,
                    start_y: y,
                    end_x: start_x,
                    end_y: start_y,
                    reverse: true,
                });
                break 'search;
            }
        }
    }

    match found {
        Some(middle) if middle.is_sound(old_size, new_size) => Ok(Some(middle)),
        _ => {
            let err = ReconcileError::NoMiddleSnake {
                old_start: range.old_start,
                old_end: range.old_end,
                new_start: range.new_start,
                new_end: range.new_end,
            };
            error!(error = %err, "bidirectional search failed");
            Err(err)
        }
    }
}
