//! Universal life benchmark CLI
//!
//! Runs N projections and N premium solves on one worker, on the fixed
//! worker pool, and on a rayon pool, and prints the timings.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use ul_projection::dispatch::{self, BatchConfig, BatchOutcome, Job, JobKind};
use ul_projection::policy::load_scenarios;
use ul_projection::rates::{loader::DEFAULT_RATES_PATH, ProductConstants};
use ul_projection::{CachedRateProvider, CsvRateProvider, RateProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Project,
    Solve,
    Both,
}

#[derive(Debug, Parser)]
#[command(name = "ul_projection", version, about = "Benchmark universal life projections and premium solves")]
struct Args {
    /// Number of jobs per benchmark
    #[arg(long, default_value_t = 1000)]
    tasks: usize,

    /// Worker threads for the pooled runs
    #[arg(long, default_value_t = dispatch::DEFAULT_WORKERS)]
    workers: usize,

    /// Jobs the producer may queue ahead of the workers (0 = direct hand-off)
    #[arg(long, default_value_t = 0)]
    queue_capacity: usize,

    /// Which job kinds to benchmark
    #[arg(long, value_enum, default_value_t = KindArg::Both)]
    kind: KindArg,

    /// Directory holding unit_load.csv, coi.csv and corridor_factors.csv
    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    data_dir: PathBuf,

    /// JSON file overriding premium load, policy fee, discount and interest rates
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Scenario CSV to run instead of the reference policy
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Cache rate sets across jobs instead of reloading tables per job
    #[arg(long)]
    cache_rates: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct BenchmarkRow {
    kind: String,
    executor: &'static str,
    tasks: usize,
    workers: usize,
    total_secs: f64,
    per_task_secs: f64,
    last_premium: Option<f64>,
    last_final_value: Option<f64>,
}

impl BenchmarkRow {
    fn new(kind: JobKind, executor: &'static str, outcome: &BatchOutcome) -> Self {
        Self {
            kind: kind.to_string(),
            executor,
            tasks: outcome.completed,
            workers: outcome.workers,
            total_secs: outcome.elapsed.as_secs_f64(),
            per_task_secs: outcome.per_job().as_secs_f64(),
            last_premium: outcome.last.as_ref().map(|r| r.annual_premium),
            last_final_value: outcome.last.as_ref().map(|r| r.final_value()),
        }
    }
}

fn result_printer(row: &BenchmarkRow) {
    println!("Results --------------------");
    if let Some(premium) = row.last_premium {
        println!("Last premium: {:.2}", premium);
    }
    println!("Total time: {:.5}s", row.total_secs);
    println!("Tasks: {}", row.tasks);
    println!("Per task: {:.6}s", row.per_task_secs);
    println!("----------------------------");
    println!();
}

fn build_jobs(args: &Args, kind: JobKind) -> Result<Vec<Job>> {
    match &args.scenarios {
        None => Ok(dispatch::default_jobs(args.tasks, kind)),
        Some(path) => {
            let scenarios = load_scenarios(path)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Failed to load scenarios from {}", path.display()))?;
            let jobs = scenarios
                .into_iter()
                .map(|s| Job::new(s, kind))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(jobs)
        }
    }
}

fn benchmark<P: RateProvider>(args: &Args, provider: &P, kind: JobKind) -> Result<Vec<BenchmarkRow>> {
    let jobs = build_jobs(args, kind)?;
    let config = BatchConfig {
        worker_count: args.workers,
        queue_capacity: args.queue_capacity,
        ..BatchConfig::default()
    };
    let mut rows = Vec::with_capacity(3);

    if !args.json {
        println!("Starting {} {} jobs with 1 worker...", jobs.len(), kind);
    }
    let outcome = dispatch::run_sequential(&config, provider, &jobs)?;
    rows.push(BenchmarkRow::new(kind, "sequential", &outcome));

    if !args.json {
        result_printer(&rows[0]);
        println!("Starting {} {} jobs with {} workers...", jobs.len(), kind, args.workers);
    }
    let outcome = dispatch::run_par_iter(&config, provider, &jobs)?;
    rows.push(BenchmarkRow::new(kind, "rayon", &outcome));

    if !args.json {
        result_printer(&rows[1]);
        println!("Starting {} {} jobs on worker pool with {} workers...", jobs.len(), kind, args.workers);
    }
    let outcome = dispatch::run_jobs(&config, provider, jobs)?;
    rows.push(BenchmarkRow::new(kind, "pool", &outcome));

    if !args.json {
        result_printer(&rows[2]);
    }

    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut csv_provider = CsvRateProvider::new(&args.data_dir);
    if let Some(path) = &args.constants {
        let constants = ProductConstants::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load constants from {}", path.display()))?;
        csv_provider = csv_provider.with_constants(constants);
    }
    let provider: Box<dyn RateProvider> = if args.cache_rates {
        Box::new(CachedRateProvider::new(csv_provider))
    } else {
        Box::new(csv_provider)
    };

    let kinds: &[JobKind] = match args.kind {
        KindArg::Project => &[JobKind::Project],
        KindArg::Solve => &[JobKind::Solve],
        KindArg::Both => &[JobKind::Project, JobKind::Solve],
    };

    let mut report = Vec::new();
    for &kind in kinds {
        report.extend(benchmark(&args, &provider, kind)?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
