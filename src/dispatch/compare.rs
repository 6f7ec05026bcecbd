//! Alternative executors for throughput comparison against the worker pool
//!
//! Both run the same jobs with the same per-job rate fetch, so records are
//! identical to the pool's; only scheduling differs.

use crate::rates::RateProvider;
use super::error::{BatchError, DispatchError};
use super::job::Job;
use super::pool::{BatchConfig, BatchOutcome};
use rayon::prelude::*;
use std::time::Instant;

/// Run jobs one after another on the calling thread
pub fn run_sequential<P: RateProvider>(
    config: &BatchConfig,
    provider: &P,
    jobs: &[Job],
) -> Result<BatchOutcome, BatchError> {
    let start = Instant::now();
    let mut last = None;

    for job in jobs {
        last = Some(job.execute(provider, &config.solver)?);
    }

    Ok(BatchOutcome {
        last,
        completed: jobs.len(),
        workers: 1,
        elapsed: start.elapsed(),
    })
}

/// Run jobs as a rayon parallel map on a pool of `config.worker_count` threads
///
/// Unlike the worker pool, `last` is the record of the last submitted job.
pub fn run_par_iter<P: RateProvider>(
    config: &BatchConfig,
    provider: &P,
    jobs: &[Job],
) -> Result<BatchOutcome, BatchError> {
    if config.worker_count == 0 {
        return Err(DispatchError::NoWorkers.into());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()?;

    let start = Instant::now();
    let mut records = pool.install(|| {
        jobs.par_iter()
            .map(|job| job.execute(provider, &config.solver))
            .collect::<Result<Vec<_>, _>>()
    })?;
    let completed = records.len();

    Ok(BatchOutcome {
        last: records.pop(),
        completed,
        workers: config.worker_count,
        elapsed: start.elapsed(),
    })
}
