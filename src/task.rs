//! Recursive reduction tasks.
//!
//! A task is bound to one range of the source slice. If the range is at most
//! the grain size it is a leaf and accumulates directly; otherwise it splits in
//! half, runs both children through a [`ForkJoin`] scheduler and joins the
//! left child's result with the right child's.

use num_traits::AsPrimitive;

use crate::leaf::accumulate;
use crate::maybe_sync::MaybeSync;
use crate::partial::PartialResult;
use crate::range::{should_split, split, IndexRange};
use crate::stats::ReduceStats;
use crate::threading::ForkJoin;
use crate::{ReduceError, Result};

/// What a task does when executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Accumulate the range directly.
    Leaf,
    /// Run children over these halves, then join left with right.
    Split(IndexRange, IndexRange),
}

/// A unit of work over `data[range]`.
#[derive(Debug)]
pub struct ReductionTask<'a, T> {
    data: &'a [T],
    range: IndexRange,
    grain: usize,
}

impl<'a, T> Clone for ReductionTask<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ReductionTask<'a, T> {}

impl<'a, T> ReductionTask<'a, T>
where
    T: AsPrimitive<f64> + MaybeSync,
{
    /// Create a task, checking the grain and that `range` fits in `data`.
    pub fn new(data: &'a [T], range: IndexRange, grain: usize) -> Result<Self> {
        if grain == 0 {
            return Err(ReduceError::ZeroGrain);
        }
        range.check_within(data.len())?;
        Ok(Self { data, range, grain })
    }

    /// Task over the whole slice.
    pub fn root(data: &'a [T], grain: usize) -> Result<Self> {
        Self::new(data, IndexRange::with_len(data.len()), grain)
    }

    pub fn range(&self) -> IndexRange {
        self.range
    }

    pub fn grain(&self) -> usize {
        self.grain
    }

    /// Decide between leaf accumulation and splitting.
    pub fn kind(&self) -> Result<TaskKind> {
        if !should_split(&self.range, self.grain) {
            return Ok(TaskKind::Leaf);
        }
        let (left, right) = split(&self.range, self.grain)?;
        Ok(TaskKind::Split(left, right))
    }

    fn child(&self, range: IndexRange) -> Self {
        Self {
            data: self.data,
            range,
            grain: self.grain,
        }
    }

    /// Run the task to completion.
    ///
    /// Children of a split may run concurrently, but the join always takes the
    /// left child's result as its left operand. An error in either child
    /// fails the whole task.
    pub fn execute<S>(self, scheduler: &S, stats: &ReduceStats) -> Result<PartialResult>
    where
        S: ForkJoin,
    {
        match self.kind()? {
            TaskKind::Leaf => {
                stats.record_leaf();
                accumulate(self.data, self.range)
            }
            TaskKind::Split(left_range, right_range) => {
                stats.record_split();
                let left = self.child(left_range);
                let right = self.child(right_range);

                let (r1, r2) = scheduler.join(
                    || left.execute(scheduler, stats),
                    || right.execute(scheduler, stats),
                );
                let left = r1?;
                let right = r2?;

                let outcome = left.join_checked(&right);
                stats.record_join(outcome.overlap.as_ref());
                log::debug!(
                    "joining {left_range} and {right_range}: {} -> {}",
                    right.weight(),
                    outcome.result.value()
                );
                Ok(outcome.result)
            }
        }
    }
}
