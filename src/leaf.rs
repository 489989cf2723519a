//! Sequential accumulation of a leaf range.

use num_traits::AsPrimitive;

use crate::partial::PartialResult;
use crate::range::IndexRange;
use crate::Result;

/// Sum `data[range]` left to right into a [`PartialResult`] that observes `range`.
///
/// Elements are widened to `f64` and added one at a time to a running total
/// starting at `0.0`; nothing is reordered or compensated.
pub fn accumulate<T>(data: &[T], range: IndexRange) -> Result<PartialResult>
where
    T: AsPrimitive<f64>,
{
    range.check_within(data.len())?;

    let mut sum = 0.0f64;
    for &val in &data[range.begin()..range.end()] {
        sum += val.as_();
    }

    log::trace!("operating on {range}: leaf sum {sum}");
    Ok(PartialResult::from_parts(sum, range))
}
