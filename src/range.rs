//! Half-open index ranges and the grain-controlled splitter.
//!
//! A range is split in half (`mid = begin + len / 2`) only while it is longer
//! than the grain size, so every leaf has length `<= grain` and the leaves of
//! `[0, n)` tile it exactly once.

use std::fmt;

use crate::{ReduceError, Result};

/// An immutable half-open interval `[begin, end)` of slice indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    begin: usize,
    end: usize,
}

impl IndexRange {
    /// Create a range, rejecting `begin > end`.
    pub fn new(begin: usize, end: usize) -> Result<Self> {
        if begin > end {
            return Err(ReduceError::InvalidRange { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// The range `[0, len)`.
    pub fn with_len(len: usize) -> Self {
        Self { begin: 0, end: len }
    }

    #[inline]
    pub fn begin(&self) -> usize {
        self.begin
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Interval test `other.begin < self.end && other.end > self.begin`.
    ///
    /// The test is symmetric in its arguments. Ranges that only touch at an
    /// endpoint do not overlap, but an empty range strictly inside the other
    /// one does.
    pub fn overlaps(&self, other: &IndexRange) -> bool {
        other.begin < self.end && other.end > self.begin
    }

    /// Smallest range containing both `self` and `other`.
    pub fn hull(&self, other: &IndexRange) -> IndexRange {
        IndexRange {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// Check that the range can index a slice of length `len`.
    pub fn check_within(&self, len: usize) -> Result<()> {
        if self.end > len {
            return Err(ReduceError::OutOfBounds {
                begin: self.begin,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.begin, self.end)
    }
}

/// Check if a range should be split: `len > grain`.
#[inline]
pub fn should_split(range: &IndexRange, grain: usize) -> bool {
    range.len() > grain
}

/// Split a range into two halves.
///
/// The left half gets `len / 2` elements and the right half the remainder, so
/// odd lengths put the extra element on the right.
///
/// Fails if the grain is zero or the range is not longer than the grain.
pub fn split(range: &IndexRange, grain: usize) -> Result<(IndexRange, IndexRange)> {
    if grain == 0 {
        return Err(ReduceError::ZeroGrain);
    }
    if !should_split(range, grain) {
        return Err(ReduceError::SplitBelowGrain {
            len: range.len(),
            grain,
        });
    }

    let mid = range.begin + range.len() / 2;
    Ok((
        IndexRange {
            begin: range.begin,
            end: mid,
        },
        IndexRange {
            begin: mid,
            end: range.end,
        },
    ))
}

/// Enumerate the leaves of the split tree of `range`, left to right.
///
/// An empty range has a single empty leaf.
pub fn leaf_ranges(range: &IndexRange, grain: usize) -> Result<Vec<IndexRange>> {
    if grain == 0 {
        return Err(ReduceError::ZeroGrain);
    }

    let mut leaves = Vec::new();
    let mut stack = vec![*range];
    // Right half pushed first so leaves come out in index order
    while let Some(r) = stack.pop() {
        if should_split(&r, grain) {
            let (left, right) = split(&r, grain)?;
            stack.push(right);
            stack.push(left);
        } else {
            leaves.push(r);
        }
    }
    Ok(leaves)
}
