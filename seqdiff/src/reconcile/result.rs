//! Per-item classification and dispatch of a reconciled diff.

use super::batch::BatchDispatcher;
use super::snake::Snake;
use super::{ItemComparator, UpdateCallback, UpdateOp};

/// What happened to one item, plus the paired position in the other sequence.
///
/// When several equal items move, any one of them may be anchored by a snake
/// and the rest are reported as moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemStatus {
    /// Pure insertion or removal.
    Unmatched,
    /// Same item, same content, covered by a snake.
    Unchanged(usize),
    /// Same item covered by a snake, but its content changed.
    Changed(usize),
    /// Moved and its content changed.
    MovedChanged(usize),
    /// Moved with identical content.
    MovedUnchanged(usize),
    /// The other end of a move; dispatched when its partner is reached.
    Ignore(usize),
}

impl ItemStatus {
    const fn moved(unchanged: bool, partner: usize) -> Self {
        if unchanged {
            Self::MovedUnchanged(partner)
        } else {
            Self::MovedChanged(partner)
        }
    }

    const fn matched(unchanged: bool, partner: usize) -> Self {
        if unchanged {
            Self::Unchanged(partner)
        } else {
            Self::Changed(partner)
        }
    }

    const fn partner(self) -> Option<usize> {
        match self {
            Self::Unmatched => None,
            Self::Unchanged(p)
            | Self::Changed(p)
            | Self::MovedChanged(p)
            | Self::MovedUnchanged(p)
            | Self::Ignore(p) => Some(p),
        }
    }
}

/// An insertion or removal held back because it is one end of a move.
#[derive(Debug, Clone, Copy)]
struct PostponedUpdate {
    owner_position: usize,
    current_position: usize,
    removal: bool,
}

/// The outcome of reconciling two sequences.
///
/// Holds the matched runs and a status per item; [`DiffResult::dispatch_to`]
/// replays them as insert, remove, move and change operations.
#[derive(Debug, Clone)]
pub struct DiffResult {
    snakes: Vec<Snake>,
    old_statuses: Vec<ItemStatus>,
    new_statuses: Vec<ItemStatus>,
    detect_moves: bool,
}

impl DiffResult {
    pub(crate) fn new<C>(comparator: &C, mut snakes: Vec<Snake>, detect_moves: bool) -> Self
    where
        C: ItemComparator + ?Sized,
    {
        // A snake at (0, 0) lets the backward walks finish when snakes run out.
        if snakes.first().is_none_or(|s| s.x != 0 || s.y != 0) {
            snakes.insert(0, Snake::root());
        }
        let mut matcher = Matcher {
            comparator,
            snakes: &snakes,
            old_statuses: vec![ItemStatus::Unmatched; comparator.old_len()],
            new_statuses: vec![ItemStatus::Unmatched; comparator.new_len()],
        };
        matcher.run(detect_moves);
        let Matcher {
            old_statuses,
            new_statuses,
            ..
        } = matcher;

        Self {
            snakes,
            old_statuses,
            new_statuses,
            detect_moves,
        }
    }

    /// Length of the old sequence.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.old_statuses.len()
    }

    /// Length of the new sequence.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.new_statuses.len()
    }

    /// Whether moves were detected when this result was computed.
    #[must_use]
    pub const fn detects_moves(&self) -> bool {
        self.detect_moves
    }

    /// Position in the new sequence of the item at `old_position`.
    ///
    /// Returns `None` for removed items and out-of-range positions.
    #[must_use]
    pub fn old_position_to_new(&self, old_position: usize) -> Option<usize> {
        self.old_statuses
            .get(old_position)
            .copied()
            .and_then(ItemStatus::partner)
    }

    /// Position in the old sequence of the item at `new_position`.
    ///
    /// Returns `None` for inserted items and out-of-range positions.
    #[must_use]
    pub fn new_position_to_old(&self, new_position: usize) -> Option<usize> {
        self.new_statuses
            .get(new_position)
            .copied()
            .and_then(ItemStatus::partner)
    }

    /// Collects the dispatched operations into a list.
    #[must_use]
    pub fn updates(&self) -> Vec<UpdateOp> {
        let mut ops = Vec::new();
        self.dispatch_to(&mut ops);
        ops
    }

    /// Sends the update operations that turn the old sequence into the new one.
    ///
    /// Operations are applied in order: each call assumes every earlier call
    /// has already been applied. Adjacent operations of the same kind are
    /// batched and the last batch is flushed before returning.
    pub fn dispatch_to<U: UpdateCallback + ?Sized>(&self, callback: &mut U) {
        let mut batch = BatchDispatcher::new(callback);
        let mut postponed = Vec::new();
        let (mut pos_old, mut pos_new) = (self.old_len(), self.new_len());

        for snake in self.snakes.iter().rev() {
            let (end_x, end_y) = (snake.end_x(), snake.end_y());
            if end_x < pos_old {
                self.dispatch_removals(&mut postponed, &mut batch, end_x, pos_old - end_x);
            }
            if end_y < pos_new {
                self.dispatch_additions(&mut postponed, &mut batch, end_x, pos_new - end_y, end_y);
            }
            for i in (0..snake.size).rev() {
                if matches!(self.old_statuses[snake.x + i], ItemStatus::Changed(_)) {
                    batch.on_changed(snake.x + i, 1);
                }
            }
            pos_old = snake.x;
            pos_new = snake.y;
        }

        batch.finish();
    }

    fn dispatch_additions<U: UpdateCallback + ?Sized>(
        &self,
        postponed: &mut Vec<PostponedUpdate>,
        callback: &mut BatchDispatcher<'_, U>,
        start: usize,
        count: usize,
        global_index: usize,
    ) {
        if !self.detect_moves {
            callback.on_inserted(start, count);
            return;
        }
        for i in (0..count).rev() {
            match self.new_statuses[global_index + i] {
                ItemStatus::Unmatched => {
                    callback.on_inserted(start, 1);
                    for update in postponed.iter_mut() {
                        update.current_position += 1;
                    }
                }
                status @ (ItemStatus::MovedChanged(old_position)
                | ItemStatus::MovedUnchanged(old_position)) => {
                    let update = take_postponed(postponed, old_position, true);
                    callback.on_moved(update.current_position, start);
                    if matches!(status, ItemStatus::MovedChanged(_)) {
                        callback.on_changed(start, 1);
                    }
                }
                ItemStatus::Ignore(_) => postponed.push(PostponedUpdate {
                    owner_position: global_index + i,
                    current_position: start,
                    removal: false,
                }),
                status @ (ItemStatus::Unchanged(_) | ItemStatus::Changed(_)) => {
                    unreachable!("inserted item {} has snake status {status:?}", global_index + i)
                }
            }
        }
    }

    fn dispatch_removals<U: UpdateCallback + ?Sized>(
        &self,
        postponed: &mut Vec<PostponedUpdate>,
        callback: &mut BatchDispatcher<'_, U>,
        start: usize,
        count: usize,
    ) {
        if !self.detect_moves {
            callback.on_removed(start, count);
            return;
        }
        for i in (0..count).rev() {
            match self.old_statuses[start + i] {
                ItemStatus::Unmatched => {
                    callback.on_removed(start + i, 1);
                    for update in postponed.iter_mut() {
                        update.current_position -= 1;
                    }
                }
                status @ (ItemStatus::MovedChanged(new_position)
                | ItemStatus::MovedUnchanged(new_position)) => {
                    let update = take_postponed(postponed, new_position, false);
                    // Removing this item shifts the target left by one.
                    let target = update.current_position - 1;
                    callback.on_moved(start + i, target);
                    if matches!(status, ItemStatus::MovedChanged(_)) {
                        callback.on_changed(target, 1);
                    }
                }
                ItemStatus::Ignore(_) => postponed.push(PostponedUpdate {
                    owner_position: start + i,
                    current_position: start + i,
                    removal: true,
                }),
                status @ (ItemStatus::Unchanged(_) | ItemStatus::Changed(_)) => {
                    unreachable!("removed item {} has snake status {status:?}", start + i)
                }
            }
        }
    }
}

/// Removes the postponed update owned by `owner_position`, shifting the ones
/// queued after it.
///
/// # Panics
///
/// Panics if no such update exists. The ignored end of a move is always
/// reached before its partner, so this indicates a corrupt status table.
fn take_postponed(
    postponed: &mut Vec<PostponedUpdate>,
    owner_position: usize,
    removal: bool,
) -> PostponedUpdate {
    let Some(index) = postponed
        .iter()
        .rposition(|u| u.owner_position == owner_position && u.removal == removal)
    else {
        unreachable!("no postponed update for position {owner_position} (removal: {removal})");
    };
    let update = postponed.remove(index);
    for other in &mut postponed[index..] {
        if removal {
            other.current_position += 1;
        } else {
            other.current_position -= 1;
        }
    }
    update
}

/// Fills the status tables, walking snakes from the end of both sequences.
struct Matcher<'a, C: ?Sized> {
    comparator: &'a C,
    snakes: &'a [Snake],
    old_statuses: Vec<ItemStatus>,
    new_statuses: Vec<ItemStatus>,
}

impl<C: ItemComparator + ?Sized> Matcher<'_, C> {
    fn run(&mut self, detect_moves: bool) {
        let (mut pos_old, mut pos_new) = (self.old_statuses.len(), self.new_statuses.len());
        for index in (0..self.snakes.len()).rev() {
            let snake = self.snakes[index];
            if detect_moves {
                while pos_old > snake.end_x() {
                    // A removal: was it added back somewhere earlier?
                    self.find_addition(pos_old, pos_new, index);
                    pos_old -= 1;
                }
                while pos_new > snake.end_y() {
                    // An addition: was it removed from somewhere earlier?
                    self.find_removal(pos_old, pos_new, index);
                    pos_new -= 1;
                }
            }
            for offset in 0..snake.size {
                let (old_position, new_position) = (snake.x + offset, snake.y + offset);
                let unchanged = self.comparator.same_content(old_position, new_position);
                self.old_statuses[old_position] = ItemStatus::matched(unchanged, new_position);
                self.new_statuses[new_position] = ItemStatus::matched(unchanged, old_position);
            }
            pos_old = snake.x;
            pos_new = snake.y;
        }
    }

    fn find_addition(&mut self, x: usize, y: usize, snake_index: usize) {
        if self.old_statuses[x - 1] != ItemStatus::Unmatched {
            return;
        }
        self.find_matching_item(x, y, snake_index, false);
    }

    fn find_removal(&mut self, x: usize, y: usize, snake_index: usize) {
        if self.new_statuses[y - 1] != ItemStatus::Unmatched {
            return;
        }
        self.find_matching_item(x, y, snake_index, true);
    }

    /// Searches the uncovered items left of and above `(x, y)` for a partner.
    ///
    /// Candidates already paired with another item are skipped, so every item
    /// takes part in at most one move.
    fn find_matching_item(&mut self, x: usize, y: usize, snake_index: usize, removal: bool) {
        let (item, mut cur_x, mut cur_y) = if removal {
            (y - 1, x, y - 1)
        } else {
            (x - 1, x - 1, y)
        };

        for index in (0..=snake_index).rev() {
            let snake = self.snakes[index];
            if removal {
                for pos in (snake.end_x()..cur_x).rev() {
                    if self.old_statuses[pos] == ItemStatus::Unmatched
                        && self.comparator.same_identity(pos, item)
                    {
                        let unchanged = self.comparator.same_content(pos, item);
                        self.new_statuses[item] = ItemStatus::Ignore(pos);
                        self.old_statuses[pos] = ItemStatus::moved(unchanged, item);
                        return;
                    }
                }
            } else {
                for pos in (snake.end_y()..cur_y).rev() {
                    if self.new_statuses[pos] == ItemStatus::Unmatched
                        && self.comparator.same_identity(item, pos)
                    {
                        let unchanged = self.comparator.same_content(item, pos);
                        self.old_statuses[item] = ItemStatus::Ignore(pos);
                        self.new_statuses[pos] = ItemStatus::moved(unchanged, item);
                        return;
                    }
                }
            }
            cur_x = snake.x;
            cur_y = snake.y;
        }
    }
}
