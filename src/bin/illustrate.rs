//! Project or solve a single policy and write the monthly record to CSV
//!
//! Usage: cargo run --bin illustrate -- --issue-age 35 --face 100000 --premium 1255.03

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use ul_projection::policy::{DEFAULT_FACE_AMOUNT, DEFAULT_GENDER, DEFAULT_ISSUE_AGE, DEFAULT_RISK_CLASS};
use ul_projection::projection::{project, solve_min_premium};
use ul_projection::rates::loader::DEFAULT_RATES_PATH;
use ul_projection::{CsvRateProvider, RateProvider};

#[derive(Debug, Parser)]
#[command(name = "illustrate", about = "Illustrate one universal life policy")]
struct Args {
    #[arg(long, default_value = DEFAULT_GENDER)]
    gender: String,

    #[arg(long, default_value = DEFAULT_RISK_CLASS)]
    risk_class: String,

    #[arg(long, default_value_t = DEFAULT_ISSUE_AGE)]
    issue_age: u8,

    #[arg(long, default_value_t = DEFAULT_FACE_AMOUNT)]
    face: f64,

    /// Annual premium; solves for the minimum premium when omitted
    #[arg(long)]
    premium: Option<f64>,

    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    data_dir: PathBuf,

    #[arg(long, default_value = "illustration_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let provider = CsvRateProvider::new(&args.data_dir);
    let rates = provider
        .get_rates(&args.gender, &args.risk_class, args.issue_age)
        .with_context(|| format!("Failed to load rates from {}", args.data_dir.display()))?;

    let record = match args.premium {
        Some(premium) => project(&rates, args.issue_age, args.face, premium),
        None => solve_min_premium(&rates, args.issue_age, args.face)?,
    };

    println!("Policy: {}/{} age {} face ${:.2}", args.gender, args.risk_class, args.issue_age, args.face);
    println!("{:>5} {:>4} {:>4} {:>12} {:>10} {:>10} {:>10} {:>12}",
        "Month", "PY", "MiPY", "Start AV", "Premium", "COI", "Interest", "End AV");
    println!("{}", "-".repeat(74));

    for row in record.rows().iter().take(24) {
        println!("{:>5} {:>4} {:>4} {:>12.2} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
            row.projection_month,
            row.policy_year,
            row.month_in_policy_year,
            row.value_start,
            row.premium,
            row.coi_charge,
            row.interest,
            row.value_end,
        );
    }
    if record.len() > 24 {
        println!("... ({} more months)", record.len() - 24);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;
    record.write_csv(file)?;
    println!("\nFull results written to: {}", args.output.display());

    let summary = record.summary();
    println!("\nSummary:");
    println!("  Annual Premium: ${:.2}", summary.annual_premium);
    println!("  Total Months: {}", summary.total_months);
    println!("  Total Premium: ${:.2}", summary.total_premium);
    println!("  Total COI: ${:.2}", summary.total_coi_charges);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Final AV: ${:.2}", summary.final_value);
    match summary.first_lapse_month {
        Some(month) => println!("  Account value exhausted in month {}", month),
        None => println!("  Policy remains in force to maturity"),
    }

    Ok(())
}
