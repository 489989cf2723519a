//! Counters filled while a reduction runs.
//!
//! Tasks on different workers bump the same [`ReduceStats`], so every counter
//! is a relaxed atomic; a [`ReduceReport`] is read once all tasks are done.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::partial::Overlap;

/// Live counters shared by all tasks of one reduction.
#[derive(Debug, Default)]
pub struct ReduceStats {
    leaves: AtomicUsize,
    splits: AtomicUsize,
    joins: AtomicUsize,
    overlaps: AtomicUsize,
}

/// Snapshot of [`ReduceStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReduceReport {
    /// Leaf ranges accumulated.
    pub leaves: usize,
    /// Ranges split in two.
    pub splits: usize,
    /// Joins performed.
    pub joins: usize,
    /// Joins whose operands claimed overlapping ranges.
    pub overlaps: usize,
}

impl ReduceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_leaf(&self) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_split(&self) {
        self.splits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_join(&self, overlap: Option<&Overlap>) {
        self.joins.fetch_add(1, Ordering::Relaxed);
        if let Some(overlap) = overlap {
            self.overlaps.fetch_add(1, Ordering::Relaxed);
            log::warn!("{overlap}");
        }
    }

    pub fn report(&self) -> ReduceReport {
        ReduceReport {
            leaves: self.leaves.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            overlaps: self.overlaps.load(Ordering::Relaxed),
        }
    }
}
