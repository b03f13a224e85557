//! Diagonal-indexed scratch arrays shared by both Myers variants.

use std::ops::{Index, IndexMut};

/// Furthest-reaching `x` per diagonal `k = x - y`, addressable by negative `k`.
#[derive(Debug, Clone)]
pub(crate) struct KLines {
    offset: isize,
    v: Vec<isize>,
}

impl KLines {
    /// Allocates room for every diagonal in `-reach..=reach`.
    pub(crate) fn new(reach: usize) -> Self {
        Self {
            offset: reach as isize,
            v: vec![0; 2 * reach + 1],
        }
    }
}

impl Index<isize> for KLines {
    type Output = isize;

    fn index(&self, k: isize) -> &Self::Output {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for KLines {
    fn index_mut(&mut self, k: isize) -> &mut Self::Output {
        &mut self.v[(k + self.offset) as usize]
    }
}
