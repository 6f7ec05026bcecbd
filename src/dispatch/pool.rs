//! Fixed-size worker pool for batches of independent jobs
//!
//! A single producer hands jobs to `worker_count` workers over a bounded task
//! queue. Each worker fetches the job's rates, runs it, and publishes the
//! record to a result queue sized to the whole batch, so workers never block
//! on publishing. The dispatcher returns once every result has been drained.
//!
//! Completion order across workers is not deterministic: the record reported
//! as `last` is the last one drained, not the last one submitted.

use crate::projection::{ProjectionRecord, SolverConfig};
use crate::rates::RateProvider;
use super::error::{BatchError, DispatchError};
use super::job::{Job, JobRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_WORKERS: usize = 8;

/// Configuration for a batch run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchConfig {
    /// Number of worker threads started for the batch
    pub worker_count: usize,

    /// Jobs the producer may enqueue ahead of the workers.
    /// Zero is a direct hand-off: the producer waits for an idle worker.
    pub queue_capacity: usize,

    pub solver: SolverConfig,
}

impl BatchConfig {
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKERS,
            queue_capacity: 0,
            solver: SolverConfig::default(),
        }
    }
}

/// Result of a completed batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Last record drained from the result queue; `None` for an empty batch
    pub last: Option<ProjectionRecord>,

    /// Number of results collected
    pub completed: usize,

    /// Number of executors the batch ran on
    pub workers: usize,

    pub elapsed: Duration,
}

impl BatchOutcome {
    /// Wall-clock time per completed job
    pub fn per_job(&self) -> Duration {
        if self.completed == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.completed as u32
        }
    }
}

type JobResult = Result<ProjectionRecord, BatchError>;

/// Validate raw requests, then run them across the worker pool
///
/// An unrecognized job kind or a projection without a premium rejects the
/// whole batch before any worker is started.
pub fn run_batch<P: RateProvider>(
    config: &BatchConfig,
    provider: &P,
    requests: Vec<JobRequest>,
) -> Result<BatchOutcome, BatchError> {
    let jobs = requests
        .into_iter()
        .map(Job::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    run_jobs(config, provider, jobs)
}

/// Run validated jobs across the worker pool
///
/// The first rate or solve failure stops the batch: workers finish the job
/// they hold, take no new ones, and the failure is returned.
pub fn run_jobs<P: RateProvider>(
    config: &BatchConfig,
    provider: &P,
    jobs: Vec<Job>,
) -> Result<BatchOutcome, BatchError> {
    if config.worker_count == 0 {
        return Err(DispatchError::NoWorkers.into());
    }

    let total = jobs.len();
    let start = Instant::now();
    log::info!("Starting batch of {} jobs on {} workers", total, config.worker_count);

    let (task_tx, task_rx) = mpsc::sync_channel::<Job>(config.queue_capacity);
    let (result_tx, result_rx) = mpsc::sync_channel::<JobResult>(total.max(1));
    let task_rx = Arc::new(Mutex::new(task_rx));
    let abort = AtomicBool::new(false);
    let solver = config.solver;

    let (last, completed, failure, panicked) = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.worker_count)
            .map(|id| {
                let result_tx = result_tx.clone();
                let task_rx = Arc::clone(&task_rx);
                let abort = &abort;
                scope.spawn(move || worker_loop(id, task_rx, result_tx, provider, &solver, abort))
            })
            .collect();
        // Only workers hold these now: the task queue closes for the producer and
        // the result queue disconnects once every worker has exited
        drop(task_rx);
        drop(result_tx);

        for job in jobs {
            if abort.load(Ordering::Acquire) {
                break;
            }
            if task_tx.send(job).is_err() {
                break;
            }
        }
        drop(task_tx);

        let mut last = None;
        let mut completed = 0;
        let mut failure = None;
        while completed < total {
            match result_rx.recv() {
                Ok(Ok(record)) => {
                    last = Some(record);
                    completed += 1;
                }
                Ok(Err(err)) => {
                    failure = Some(err);
                    break;
                }
                Err(_) => break,
            }
        }

        let panicked = handles.into_iter().map(|h| h.join()).filter(|r| r.is_err()).count();
        (last, completed, failure, panicked)
    });

    let elapsed = start.elapsed();

    if let Some(err) = failure {
        log::warn!("Batch aborted after {} of {} jobs: {}", completed, total, err);
        return Err(err);
    }
    if panicked > 0 || completed < total {
        log::warn!("Batch lost workers: {} panicked, {} of {} results", panicked, completed, total);
        return Err(BatchError::WorkerPanicked(panicked));
    }

    log::info!("Batch of {} jobs finished in {:?}", total, elapsed);

    Ok(BatchOutcome {
        last,
        completed,
        workers: config.worker_count,
        elapsed,
    })
}

fn worker_loop<P: RateProvider>(
    id: usize,
    task_rx: Arc<Mutex<Receiver<Job>>>,
    result_tx: SyncSender<JobResult>,
    provider: &P,
    solver: &SolverConfig,
    abort: &AtomicBool,
) {
    let mut done = 0;

    loop {
        if abort.load(Ordering::Acquire) {
            break;
        }

        // Lock is released at the end of this statement, before the job runs
        let job = match task_rx.lock().unwrap_or_else(PoisonError::into_inner).recv() {
            Ok(job) => job,
            // Producer closed the queue
            Err(_) => break,
        };
        if abort.load(Ordering::Acquire) {
            break;
        }

        let result = job.execute(provider, solver);
        if result.is_err() {
            abort.store(true, Ordering::Release);
        }
        if result_tx.send(result).is_err() {
            break;
        }
        done += 1;
    }

    log::debug!("Worker {} exiting after {} jobs", id, done);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::job::{default_jobs, JobKind};
    use crate::policy::PolicyScenario;
    use crate::rates::{sample::sample_rates, RateError, RateSet};
    use std::sync::atomic::AtomicUsize;

    /// Sample rates for any key; counts calls and can fail or panic on one issue age
    struct StubProvider {
        calls: AtomicUsize,
        fail_age: Option<u8>,
        panic_age: Option<u8>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0), fail_age: None, panic_age: None }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RateProvider for StubProvider {
        fn get_rates(&self, _gender: &str, _risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(issue_age) == self.fail_age {
                return Err(RateError::Malformed { table: "coi", reason: "stub failure".into() });
            }
            if Some(issue_age) == self.panic_age {
                panic!("rate lookup panicked for age {}", issue_age);
            }
            Ok(sample_rates(issue_age))
        }
    }

    #[test]
    fn test_every_job_consumed_once() {
        for workers in [1, 2, 5] {
            let provider = StubProvider::new();
            let jobs = default_jobs(5, JobKind::Project);

            let outcome = run_jobs(&BatchConfig::with_workers(workers), &provider, jobs).unwrap();

            assert_eq!(outcome.completed, 5);
            assert_eq!(outcome.workers, workers);
            assert_eq!(provider.calls(), 5);
            assert_eq!(outcome.last.unwrap().len(), 1032);
        }
    }

    #[test]
    fn test_more_workers_than_jobs() {
        let provider = StubProvider::new();
        let outcome = run_jobs(&BatchConfig::with_workers(16), &provider, default_jobs(3, JobKind::Project)).unwrap();

        assert_eq!(outcome.completed, 3);
        assert_eq!(provider.calls(), 3);
    }

    #[test]
    fn test_buffered_queue() {
        let provider = StubProvider::new();
        let config = BatchConfig { queue_capacity: 4, ..BatchConfig::with_workers(2) };

        let outcome = run_jobs(&config, &provider, default_jobs(10, JobKind::Project)).unwrap();
        assert_eq!(outcome.completed, 10);
    }

    #[test]
    fn test_empty_batch() {
        let provider = StubProvider::new();
        let outcome = run_jobs(&BatchConfig::with_workers(2), &provider, Vec::new()).unwrap();

        assert_eq!(outcome.completed, 0);
        assert!(outcome.last.is_none());
        assert_eq!(outcome.per_job(), Duration::ZERO);
    }

    #[test]
    fn test_invalid_kind_starts_no_work() {
        let provider = StubProvider::new();
        let requests = vec![
            JobRequest::new(PolicyScenario::reference(), "project"),
            JobRequest::new(PolicyScenario::reference(), "price"),
        ];

        let err = run_batch(&BatchConfig::default(), &provider, requests).unwrap_err();

        assert!(matches!(err, BatchError::Invalid(DispatchError::InvalidJobKind(ref k)) if k == "price"));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let provider = StubProvider::new();
        let err = run_jobs(&BatchConfig::with_workers(0), &provider, default_jobs(1, JobKind::Project)).unwrap_err();

        assert!(matches!(err, BatchError::Invalid(DispatchError::NoWorkers)));
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_rate_failure_aborts_batch() {
        let provider = StubProvider { fail_age: Some(60), ..StubProvider::new() };
        let mut jobs = default_jobs(20, JobKind::Project);
        jobs[3].scenario.issue_age = 60;

        let err = run_jobs(&BatchConfig::with_workers(2), &provider, jobs).unwrap_err();

        match err {
            BatchError::Rates { scenario, .. } => assert_eq!(scenario.issue_age, 60),
            other => panic!("expected rate failure, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_failure_names_scenario() {
        let provider = StubProvider::new();
        let mut jobs = default_jobs(4, JobKind::Solve);
        jobs[2].scenario.face_amount = 0.0;

        let err = run_jobs(&BatchConfig::with_workers(1), &provider, jobs).unwrap_err();
        assert!(matches!(err, BatchError::Solve { ref scenario, .. } if scenario.face_amount == 0.0));
    }

    #[test]
    fn test_worker_panic_reported() {
        for workers in [1, 3] {
            let provider = StubProvider { panic_age: Some(70), ..StubProvider::new() };
            let mut jobs = default_jobs(6, JobKind::Project);
            jobs[2].scenario.issue_age = 70;

            let err = run_jobs(&BatchConfig::with_workers(workers), &provider, jobs).unwrap_err();

            assert!(matches!(err, BatchError::WorkerPanicked(1)), "workers {}: {:?}", workers, err);
        }
    }
}
