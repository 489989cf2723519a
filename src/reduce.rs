//! Entry points: build the root task, run it on the configured schedule.

use num_traits::AsPrimitive;

use crate::maybe_sync::MaybeSync;
use crate::stats::{ReduceReport, ReduceStats};
use crate::task::ReductionTask;
#[cfg(feature = "parallel")]
use crate::threading::{build_pool, RayonJoin};
use crate::threading::{Schedule, Sequential};
use crate::{ReduceError, Result, DEFAULT_GRAIN_SIZE};

/// Grain size and schedule for one reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Ranges longer than this are split. Must be positive.
    pub grain_size: usize,
    pub schedule: Schedule,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRAIN_SIZE)
    }
}

impl ReduceConfig {
    /// Config with the given grain on the default schedule.
    pub fn new(grain_size: usize) -> Self {
        Self {
            grain_size,
            schedule: Schedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.grain_size == 0 {
            return Err(ReduceError::ZeroGrain);
        }
        match self.schedule {
            #[cfg(feature = "parallel")]
            Schedule::Pool { threads: 0 } => Err(ReduceError::ZeroThreads),
            _ => Ok(()),
        }
    }
}

/// Final value of a reduction plus what it took to get there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReduceOutcome {
    pub value: f64,
    pub report: ReduceReport,
}

/// Reduce the whole slice with the default schedule.
///
/// ```rust
/// use blocked_reduce::reduce;
///
/// // Leaves [0,1) = 2 and [1,2) = 6: 2 / 2 + 6
/// assert_eq!(reduce(&[2.0f64, 6.0], 1).unwrap(), 7.0);
/// ```
pub fn reduce<T>(data: &[T], grain_size: usize) -> Result<f64>
where
    T: AsPrimitive<f64> + MaybeSync,
{
    reduce_prefix(data, data.len(), grain_size)
}

/// Reduce the first `n` elements of `data` with the default schedule.
///
/// `n == 0` gives `0.0` without running a task. `n` past the end of `data`
/// is an error.
pub fn reduce_prefix<T>(data: &[T], n: usize, grain_size: usize) -> Result<f64>
where
    T: AsPrimitive<f64> + MaybeSync,
{
    if n > data.len() {
        return Err(ReduceError::LengthExceedsData { n, len: data.len() });
    }
    let outcome = reduce_with(&data[..n], &ReduceConfig::new(grain_size))?;
    Ok(outcome.value)
}

/// Reduce `data` as configured.
pub fn reduce_with<T>(data: &[T], config: &ReduceConfig) -> Result<ReduceOutcome>
where
    T: AsPrimitive<f64> + MaybeSync,
{
    config.validate()?;

    let stats = ReduceStats::new();
    if data.is_empty() {
        log::debug!("empty input, returning identity");
        return Ok(ReduceOutcome {
            value: 0.0,
            report: stats.report(),
        });
    }

    let root = ReductionTask::root(data, config.grain_size)?;
    log::debug!(
        "reducing {} elements, grain {}, {:?} on {} thread(s)",
        data.len(),
        config.grain_size,
        config.schedule,
        config.schedule.threads()
    );

    let result = match config.schedule {
        Schedule::Sequential => root.execute(&Sequential, &stats)?,
        #[cfg(feature = "parallel")]
        Schedule::Parallel => root.execute(&RayonJoin, &stats)?,
        #[cfg(feature = "parallel")]
        Schedule::Pool { threads } => {
            let pool = build_pool(threads)?;
            pool.install(|| root.execute(&RayonJoin, &stats))?
        }
    };

    let report = stats.report();
    log::debug!(
        "reduced to {} ({} leaves, {} joins, {} overlaps)",
        result.value(),
        report.leaves,
        report.joins,
        report.overlaps
    );
    Ok(ReduceOutcome {
        value: result.value(),
        report,
    })
}
