//! Fork-join reduction over blocked index ranges.
//!
//! This crate reduces a contiguous slice of floating-point values by
//! recursively halving its index range, summing each leaf range left to right,
//! and combining sibling results with a decay-weighted join: the left partial
//! is halved once per element covered by the right partial before the right
//! partial is added.
//!
//! # Core Types
//!
//! - [`IndexRange`]: Immutable half-open index interval with grain-controlled splitting
//! - [`PartialResult`]: Accumulated value plus the hull of every range folded into it
//! - [`ReductionTask`]: Recursive unit of work (leaf accumulation or split-and-join)
//! - [`ForkJoin`]: The minimal scheduler contract ([`Sequential`], [`RayonJoin`])
//!
//! # Primary API
//!
//! - [`reduce`]: Reduce a whole slice with a given grain size
//! - [`reduce_prefix`]: Reduce the first `n` elements of a slice
//! - [`reduce_with`]: Reduce with a [`ReduceConfig`] and get a [`ReduceReport`] back
//!
//! # Reference implementations
//!
//! - [`serial_halving_fold`]: `sum = (sum + a[i]) / 2` over the whole slice
//! - [`leaf_fold`]: Left-deep join of the same leaves the fork-join tree produces
//!
//! # Example
//!
//! ```rust
//! use blocked_reduce::reduce;
//!
//! let data = vec![1.0f64; 8];
//!
//! // One leaf: a plain left-to-right sum.
//! assert_eq!(reduce(&data, 8).unwrap(), 8.0);
//!
//! // Leaves of four: 4.0 halved four times, plus 4.0.
//! assert_eq!(reduce(&data, 4).unwrap(), 4.25);
//! ```
//!
//! # The join is not a sum
//!
//! The result depends on where the leaf boundaries fall (the grain size), and
//! joining in the other order gives a different value:
//!
//! ```rust
//! use blocked_reduce::{IndexRange, PartialResult};
//!
//! let a = PartialResult::from_parts(10.0, IndexRange::new(0, 4).unwrap());
//! let b = PartialResult::from_parts(3.0, IndexRange::new(4, 6).unwrap());
//!
//! assert_eq!(a.join(&b).value(), 10.0 / 4.0 + 3.0);
//! assert_eq!(b.join(&a).value(), 3.0 / 16.0 + 10.0);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): rayon-backed [`Schedule::Parallel`] and [`Schedule::Pool`]
//! - `cli`: the `halving-sum` binary

mod leaf;
mod maybe_sync;
mod partial;
mod range;
mod reduce;
mod reference;
mod stats;
mod task;
mod threading;

// ============================================================================
// Index ranges
// ============================================================================
pub use range::{leaf_ranges, should_split, split, IndexRange};

// ============================================================================
// Partial results and the join rule
// ============================================================================
pub use leaf::accumulate;
pub use partial::{JoinOutcome, Overlap, PartialResult};

// ============================================================================
// Tasks and scheduling
// ============================================================================
pub use maybe_sync::{MaybeSend, MaybeSync};
pub use task::{ReductionTask, TaskKind};
#[cfg(feature = "parallel")]
pub use threading::RayonJoin;
pub use threading::{ForkJoin, Schedule, Sequential};

// ============================================================================
// Driver
// ============================================================================
pub use reduce::{reduce, reduce_prefix, reduce_with, ReduceConfig, ReduceOutcome};
pub use stats::{ReduceReport, ReduceStats};

// ============================================================================
// Reference implementations
// ============================================================================
pub use reference::{leaf_fold, serial_halving_fold};

// ============================================================================
// Constants
// ============================================================================

/// Default grain size: ranges longer than this are split.
///
/// A grain of one splits all the way down to single elements, which is what a
/// blocked range does when no grain is given.
pub const DEFAULT_GRAIN_SIZE: usize = 1;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building or running a reduction.
#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    /// Range end lies before its beginning.
    #[error("invalid range: begin {begin} > end {end}")]
    InvalidRange { begin: usize, end: usize },

    /// Range does not fit inside the source slice.
    #[error("range [{begin}..{end}) out of bounds for length {len}")]
    OutOfBounds { begin: usize, end: usize, len: usize },

    /// Grain size must be positive.
    #[error("grain size must be positive")]
    ZeroGrain,

    /// A split was requested on a range that is not larger than the grain.
    #[error("cannot split range of length {len} with grain {grain}")]
    SplitBelowGrain { len: usize, grain: usize },

    /// Requested element count exceeds the source slice.
    #[error("requested {n} elements from a slice of length {len}")]
    LengthExceedsData { n: usize, len: usize },

    /// A dedicated pool needs at least one worker.
    #[error("thread count must be positive")]
    ZeroThreads,

    /// Building a dedicated rayon pool failed.
    #[cfg(feature = "parallel")]
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;
