//! Shared helpers for the integration tests.
//!
//! Provides proptest strategies for small sequences and a reference model that
//! replays reconciliation updates against a copy of the old sequence.

#![allow(dead_code)]

use proptest::prelude::*;
use seqdiff::UpdateOp;

/// An item with a stable identity and a content version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Identity; equal ids are the same logical item.
    pub id: u8,
    /// Content; a different version of the same id is a content change.
    pub version: u8,
}

/// One position of the replayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// The old item occupying the slot, or `None` for an inserted slot.
    pub item: Option<Item>,
    /// Whether a `Changed` operation covered the slot.
    pub refreshed: bool,
}

/// Short sequences over a small alphabet, so matches and duplicates are common.
pub fn symbols() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 0..16)
}

/// Short item lists with repeated ids and occasional content changes.
pub fn items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u8..8, 0u8..2), 0..14).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(id, version)| Item { id, version })
            .collect()
    })
}

/// Short item lists in which every id appears once.
pub fn unique_items() -> impl Strategy<Value = Vec<Item>> {
    let ids = Just((0u8..12).collect::<Vec<_>>()).prop_shuffle();
    (ids, 0usize..12, prop::collection::vec(0u8..2, 12))
        .prop_map(|(ids, len, versions)| {
            ids.into_iter()
                .take(len)
                .zip(versions)
                .map(|(id, version)| Item { id, version })
                .collect()
        })
}

/// Replays `ops` in order against a copy of `old`.
///
/// # Panics
///
/// Panics if an operation addresses a position outside the current list.
pub fn replay(old: &[Item], ops: &[UpdateOp]) -> Vec<Slot> {
    let mut list: Vec<Slot> = old
        .iter()
        .map(|&item| Slot {
            item: Some(item),
            refreshed: false,
        })
        .collect();

    for op in ops {
        match *op {
            UpdateOp::Inserted { position, count } => {
                for _ in 0..count {
                    list.insert(
                        position,
                        Slot {
                            item: None,
                            refreshed: false,
                        },
                    );
                }
            }
            UpdateOp::Removed { position, count } => {
                list.drain(position..position + count);
            }
            UpdateOp::Moved { from, to } => {
                let slot = list.remove(from);
                list.insert(to, slot);
            }
            UpdateOp::Changed { position, count } => {
                for slot in &mut list[position..position + count] {
                    slot.refreshed = true;
                }
            }
        }
    }
    list
}

/// Checks that `slots` lines up with `new`: every kept item sits where an item
/// of the same id belongs, and is refreshed exactly when its content differs.
pub fn check_replay(slots: &[Slot], new: &[Item]) -> Result<(), String> {
    if slots.len() != new.len() {
        return Err(format!("length {} but expected {}", slots.len(), new.len()));
    }
    for (position, (slot, fresh)) in slots.iter().zip(new).enumerate() {
        let Some(item) = slot.item else {
            continue;
        };
        if item.id != fresh.id {
            return Err(format!("position {position} holds {item:?}, expected id {}", fresh.id));
        }
        if slot.refreshed != (item.version != fresh.version) {
            return Err(format!(
                "position {position} refreshed={} but {item:?} -> {fresh:?}",
                slot.refreshed
            ));
        }
    }
    Ok(())
}

/// Number of items removed, inserted and moved by `ops`.
pub fn tally(ops: &[UpdateOp]) -> (usize, usize, usize) {
    ops.iter()
        .fold((0, 0, 0), |(removed, inserted, moved), op| match *op {
            UpdateOp::Removed { count, .. } => (removed + count, inserted, moved),
            UpdateOp::Inserted { count, .. } => (removed, inserted + count, moved),
            UpdateOp::Moved { .. } => (removed, inserted, moved + 1),
            UpdateOp::Changed { .. } => (removed, inserted, moved),
        })
}

/// Length of the longest common subsequence, by dynamic programming.
pub fn lcs_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    let mut row = vec![0usize; new.len() + 1];
    for a in old {
        let mut diagonal = 0;
        for (j, b) in new.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if a == b {
                diagonal + 1
            } else {
                row[j + 1].max(row[j])
            };
            diagonal = above;
        }
    }
    row[new.len()]
}
