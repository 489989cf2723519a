//! Partial results and the decay-weighted join.
//!
//! Joining a left partial `L` with a right partial `R` halves `L.value` once
//! for every index `R` covers and then adds `R.value` undecayed. The observed
//! ranges widen to their hull. Because the left side is weighted by the size
//! of the right side, the join is not commutative, and once observed ranges
//! stop being adjacent it is not associative either.

use std::fmt;

use crate::range::IndexRange;

/// Accumulated value plus the hull of every range folded into it.
///
/// `observed` is `None` until a range has been merged in; it is bookkeeping
/// for overlap diagnostics and for the decay count of a later join.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartialResult {
    value: f64,
    observed: Option<IndexRange>,
}

impl Default for PartialResult {
    fn default() -> Self {
        Self::identity()
    }
}

/// Two partial results whose observed ranges share indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlap {
    pub left: IndexRange,
    pub right: IndexRange,
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joining overlapping ranges {} and {}", self.left, self.right)
    }
}

/// The joined result together with the overlap anomaly, if one was seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoinOutcome {
    pub result: PartialResult,
    pub overlap: Option<Overlap>,
}

impl PartialResult {
    /// The empty result: `0.0` with no observed range.
    pub const fn identity() -> Self {
        Self {
            value: 0.0,
            observed: None,
        }
    }

    /// A result that has observed exactly `range`.
    pub const fn from_parts(value: f64, range: IndexRange) -> Self {
        Self {
            value,
            observed: Some(range),
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn observed(&self) -> Option<IndexRange> {
        self.observed
    }

    /// Number of indices this result covers, i.e. how many times it decays a
    /// left neighbour when used as the right side of a join.
    #[inline]
    pub fn weight(&self) -> usize {
        self.observed.map_or(0, |r| r.len())
    }

    /// Join `self` (left) with `right`, reporting any overlap.
    ///
    /// The value is `self.value / 2^k + right.value` with `k = right.weight()`,
    /// computed by halving `k` times.
    pub fn join_checked(&self, right: &PartialResult) -> JoinOutcome {
        let overlap = match (self.observed, right.observed) {
            (Some(l), Some(r)) if l.overlaps(&r) => Some(Overlap { left: l, right: r }),
            _ => None,
        };

        let value = halve_repeatedly(self.value, right.weight()) + right.value;

        let observed = match (self.observed, right.observed) {
            (Some(l), Some(r)) => Some(l.hull(&r)),
            (l, r) => l.or(r),
        };

        JoinOutcome {
            result: PartialResult { value, observed },
            overlap,
        }
    }

    /// Join `self` (left) with `right`.
    ///
    /// An overlap between the two observed ranges is logged at `warn` level and
    /// otherwise ignored.
    pub fn join(&self, right: &PartialResult) -> PartialResult {
        let outcome = self.join_checked(right);
        if let Some(overlap) = outcome.overlap {
            log::warn!("{overlap}");
        }
        outcome.result
    }
}

/// Divide by two, `steps` times.
///
/// Zero, infinities and NaN are fixed points of halving, so the loop stops
/// early once it reaches one; the result is the same as running every step.
fn halve_repeatedly(value: f64, steps: usize) -> f64 {
    let mut tmp = value;
    for _ in 0..steps {
        if tmp == 0.0 || !tmp.is_finite() {
            break;
        }
        tmp /= 2.0;
    }
    tmp
}
