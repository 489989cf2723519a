//! Fork-join scheduling for reduction tasks.
//!
//! The reduction only needs one primitive from a scheduler: run two closures,
//! possibly in parallel, and hand back both results once both have finished.
//! [`ForkJoin`] names that primitive. [`Sequential`] runs left then right on
//! the calling thread; [`RayonJoin`] delegates to `rayon::join`, which lets
//! idle workers steal the right-hand side.

use crate::maybe_sync::{MaybeSend, MaybeSync};
#[cfg(feature = "parallel")]
use crate::{ReduceError, Result};

/// Run two closures and return both results.
///
/// Implementations may run `a` and `b` in any order or concurrently, but must
/// not return before both have completed.
pub trait ForkJoin: MaybeSync {
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + MaybeSend,
        B: FnOnce() -> RB + MaybeSend,
        RA: MaybeSend,
        RB: MaybeSend;
}

/// Runs both halves on the calling thread, left first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl ForkJoin for Sequential {
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + MaybeSend,
        B: FnOnce() -> RB + MaybeSend,
        RA: MaybeSend,
        RB: MaybeSend,
    {
        let ra = a();
        let rb = b();
        (ra, rb)
    }
}

/// Runs both halves with `rayon::join` on the current rayon pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RayonJoin;

#[cfg(feature = "parallel")]
impl ForkJoin for RayonJoin {
    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + MaybeSend,
        B: FnOnce() -> RB + MaybeSend,
        RA: MaybeSend,
        RB: MaybeSend,
    {
        rayon::join(a, b)
    }
}

/// Where the tasks of a reduction run.
///
/// The schedule never changes the result: the grain size fixes the split
/// tree, and every join runs in tree order regardless of which thread ran
/// the children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Everything on the calling thread.
    Sequential,
    /// The global (or currently installed) rayon pool.
    #[cfg(feature = "parallel")]
    Parallel,
    /// A dedicated rayon pool with `threads` workers, built per reduction.
    #[cfg(feature = "parallel")]
    Pool { threads: usize },
}

impl Default for Schedule {
    fn default() -> Self {
        #[cfg(feature = "parallel")]
        let schedule = Schedule::Parallel;
        #[cfg(not(feature = "parallel"))]
        let schedule = Schedule::Sequential;
        schedule
    }
}

impl Schedule {
    /// Number of threads tasks may run on.
    pub fn threads(&self) -> usize {
        match self {
            Schedule::Sequential => 1,
            #[cfg(feature = "parallel")]
            Schedule::Parallel => rayon::current_num_threads(),
            #[cfg(feature = "parallel")]
            Schedule::Pool { threads } => *threads,
        }
    }
}

/// Build a dedicated pool for [`Schedule::Pool`].
#[cfg(feature = "parallel")]
pub(crate) fn build_pool(threads: usize) -> Result<rayon::ThreadPool> {
    if threads == 0 {
        return Err(ReduceError::ZeroThreads);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("blocked-reduce-{i}"))
        .build()?;
    Ok(pool)
}
