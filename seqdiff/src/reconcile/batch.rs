//! Coalescing of adjacent update operations.

use super::UpdateCallback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Insert,
    Remove,
    Change,
}

#[derive(Debug, Clone, Copy)]
struct PendingEvent {
    kind: EventKind,
    position: usize,
    count: usize,
}

/// Wraps an [`UpdateCallback`] and merges consecutive inserts, removals and
/// changes that touch contiguous positions into single counted calls.
///
/// The last event is held back until it can no longer be merged. Call
/// [`BatchDispatcher::finish`] when done; dropping the dispatcher flushes too,
/// so a pending event is never lost.
pub struct BatchDispatcher<'a, U: UpdateCallback + ?Sized> {
    inner: &'a mut U,
    pending: Option<PendingEvent>,
}

impl<'a, U: UpdateCallback + ?Sized> BatchDispatcher<'a, U> {
    /// Creates a dispatcher forwarding merged events to `inner`.
    pub fn new(inner: &'a mut U) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    /// Flushes the pending event and releases the wrapped callback.
    pub fn finish(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        let Some(event) = self.pending.take() else {
            return;
        };
        match event.kind {
            EventKind::Insert => self.inner.on_inserted(event.position, event.count),
            EventKind::Remove => self.inner.on_removed(event.position, event.count),
            EventKind::Change => self.inner.on_changed(event.position, event.count),
        }
    }

    fn replace_pending(&mut self, kind: EventKind, position: usize, count: usize) {
        self.flush();
        self.pending = Some(PendingEvent {
            kind,
            position,
            count,
        });
    }
}

impl<U: UpdateCallback + ?Sized> UpdateCallback for BatchDispatcher<'_, U> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        if let Some(last) = self.pending.as_mut()
            && last.kind == EventKind::Insert
            && position >= last.position
            && position <= last.position + last.count
        {
            last.count += count;
            last.position = last.position.min(position);
            return;
        }
        self.replace_pending(EventKind::Insert, position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        if let Some(last) = self.pending.as_mut()
            && last.kind == EventKind::Remove
            && last.position >= position
            && last.position <= position + count
        {
            last.count += count;
            last.position = position;
            return;
        }
        self.replace_pending(EventKind::Remove, position, count);
    }

    fn on_moved(&mut self, from_position: usize, to_position: usize) {
        // Moves are never merged.
        self.flush();
        self.inner.on_moved(from_position, to_position);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        if let Some(last) = self.pending.as_mut()
            && last.kind == EventKind::Change
            && position <= last.position + last.count
            && position + count >= last.position
        {
            let previous_end = last.position + last.count;
            last.position = last.position.min(position);
            last.count = previous_end.max(position + count) - last.position;
            return;
        }
        self.replace_pending(EventKind::Change, position, count);
    }
}

impl<U: UpdateCallback + ?Sized> Drop for BatchDispatcher<'_, U> {
    fn drop(&mut self) {
        self.flush();
    }
}
