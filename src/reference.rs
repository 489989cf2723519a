//! Single-threaded reference reductions.

use num_traits::AsPrimitive;

use crate::leaf::accumulate;
use crate::partial::PartialResult;
use crate::range::{leaf_ranges, IndexRange};
use crate::Result;

/// `sum = (sum + a[i]) / 2` over the whole slice, left to right.
///
/// This is the element-at-a-time version of the decay rule: every element is
/// halved once per element to its right, and once more for itself.
pub fn serial_halving_fold<T>(data: &[T]) -> f64
where
    T: AsPrimitive<f64>,
{
    let mut sum = 0.0f64;
    for &val in data {
        sum = (sum + val.as_()) / 2.0;
    }
    sum
}

/// Join the leaves of the split tree one by one, left to right.
///
/// The leaves are the ones a fork-join reduction with the same grain would
/// accumulate, but they are combined as a left-deep chain instead of a
/// balanced tree. Halving is exact, so the two agree up to the rounding of the
/// additions, and exactly when every intermediate sum is representable.
pub fn leaf_fold<T>(data: &[T], grain_size: usize) -> Result<f64>
where
    T: AsPrimitive<f64>,
{
    let mut acc = PartialResult::identity();
    for leaf in leaf_ranges(&IndexRange::with_len(data.len()), grain_size)? {
        acc = acc.join(&accumulate(data, leaf)?);
    }
    Ok(acc.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReduceError;

    #[test]
    fn test_serial_halving_fold() {
        assert_eq!(serial_halving_fold::<f64>(&[]), 0.0);
        // ((0 + 4) / 2 + 2) / 2
        assert_eq!(serial_halving_fold(&[4.0f64, 2.0]), 2.0);
    }

    #[test]
    fn test_serial_halving_fold_converges_to_constant() {
        let data = vec![1.0f32; 200];
        assert_eq!(serial_halving_fold(&data), 1.0);
    }

    #[test]
    fn test_leaf_fold_grain_one_is_halving_fold_times_two() {
        // With single-element leaves each element is halved once per element
        // to its right, one fewer than the serial fold.
        let data = [3.0f64, 5.0, 7.0, 11.0];
        assert_eq!(leaf_fold(&data, 1).unwrap(), 2.0 * serial_halving_fold(&data));
    }

    #[test]
    fn test_leaf_fold_single_leaf() {
        let data = [1.0f64, 2.0, 3.0];
        assert_eq!(leaf_fold(&data, 3).unwrap(), 6.0);
    }

    #[test]
    fn test_leaf_fold_empty() {
        assert_eq!(leaf_fold::<f64>(&[], 1).unwrap(), 0.0);
    }

    #[test]
    fn test_leaf_fold_zero_grain() {
        assert!(matches!(leaf_fold(&[1.0f64], 0), Err(ReduceError::ZeroGrain)));
    }
}
