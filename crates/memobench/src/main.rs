//! memobench - LRU caching vs. splay-tree memoization

mod report;
mod runner;
mod workload;

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use splaymemo::MAX_FIB_ARG;
use tracing::info;

use crate::report::{fib_table, range_table, FibRow, RangeReport, Report, ReportBody};
use crate::workload::{Workload, WorkloadConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Also write the report as JSON to this path
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Random range-sum queries and updates, with and without an LRU cache
    Range(RangeArgs),
    /// Cold Fibonacci runs, LRU cache against splay tree
    Fib(FibArgs),
}

#[derive(clap::Args, Debug)]
struct RangeArgs {
    /// Array length
    #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
    array_size: u64,

    /// Number of steps in the workload
    #[arg(long, default_value_t = 50_000)]
    queries: usize,

    /// Fraction of steps that are updates (0.0 to 1.0)
    #[arg(long, default_value_t = 0.3)]
    update_ratio: f64,

    /// Cache capacity (number of range sums)
    #[arg(short, long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    capacity: u64,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl RangeArgs {
    fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.update_ratio),
            "update ratio must be within 0.0..=1.0, got {}",
            self.update_ratio
        );
        Ok(())
    }
}

#[derive(clap::Args, Debug)]
struct FibArgs {
    /// First argument
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last argument (inclusive)
    #[arg(long, default_value_t = 180)]
    end: u64,

    /// Distance between arguments
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    step: u64,

    /// Runs averaged per argument
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    repeats: u32,

    /// LRU capacity; sized to hold every subresult when omitted
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    capacity: Option<u64>,
}

impl FibArgs {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.start <= self.end,
            "start ({}) must not exceed end ({})",
            self.start,
            self.end
        );
        ensure!(
            self.end <= MAX_FIB_ARG,
            "end must be at most {} (larger values overflow u128)",
            MAX_FIB_ARG
        );
        Ok(())
    }

    fn arguments(&self) -> Vec<u64> {
        (self.start..=self.end).step_by(self.step as usize).collect()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("memobench v{}", env!("CARGO_PKG_VERSION"));

    let body = match &args.command {
        Command::Range(range) => run_range(range)?,
        Command::Fib(fib) => run_fib(fib)?,
    };

    if let Some(path) = &args.json {
        Report::new(body).write_json(path)?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}

fn run_range(args: &RangeArgs) -> Result<ReportBody> {
    args.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = WorkloadConfig {
        array_size: args.array_size as usize,
        queries: args.queries,
        update_ratio: args.update_ratio,
    };
    let capacity = args.capacity as usize;

    info!("Array size: {}", config.array_size);
    info!(
        "Queries: {} (update ratio {})",
        config.queries, config.update_ratio
    );
    info!("Cache capacity: {}", capacity);
    info!("Seed: {}", seed);

    let workload = Workload::generate(&config, &mut StdRng::seed_from_u64(seed));
    info!("Generated {} updates", workload.update_count());
    let run = runner::run_range(&workload, capacity)?;
    info!(
        "Uncached: {:.2}s, cached: {:.2}s",
        run.uncached.as_secs_f64(),
        run.cached.as_secs_f64()
    );

    let report = RangeReport::new(config, capacity, seed, &run);
    println!("{}", range_table(&report));

    Ok(ReportBody::Range(report))
}

fn run_fib(args: &FibArgs) -> Result<ReportBody> {
    args.validate()?;

    let arguments = args.arguments();
    info!(
        "Fibonacci n = {}..={} step {} ({} repeats)",
        args.start, args.end, args.step, args.repeats
    );

    let capacity = args.capacity.map(|c| c as usize);
    let samples = runner::run_fib(&arguments, args.repeats, capacity)?;
    let rows: Vec<FibRow> = samples.iter().map(FibRow::from).collect();
    println!("{}", fib_table(&rows));

    Ok(ReportBody::Fibonacci {
        repeats: args.repeats,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_parse(line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(line.split_whitespace())
    }

    fn parse(line: &str) -> Args {
        try_parse(line).unwrap()
    }

    #[test]
    fn test_range_defaults() {
        let args = parse("memobench range");

        let Command::Range(range) = args.command else {
            panic!("expected range subcommand");
        };
        assert_eq!(range.array_size, 100_000);
        assert_eq!(range.queries, 50_000);
        assert_eq!(range.update_ratio, 0.3);
        assert_eq!(range.capacity, 1000);
        assert_eq!(range.seed, None);
        assert!(args.json.is_none());
    }

    #[test]
    fn test_fib_arguments() {
        let args = parse("memobench fib --start 5 --end 25 --step 10");

        let Command::Fib(fib) = args.command else {
            panic!("expected fib subcommand");
        };
        fib.validate().unwrap();
        assert_eq!(fib.arguments(), vec![5, 15, 25]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse("memobench fib --json out.json -v");

        assert!(args.verbose);
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert!(try_parse("memobench range --capacity 0").is_err());
        assert!(try_parse("memobench fib --step 0").is_err());
    }

    #[test]
    fn test_validation() {
        let args = parse("memobench range --update-ratio 1.5");
        let Command::Range(range) = args.command else {
            panic!("expected range subcommand");
        };
        assert!(range.validate().is_err());

        let args = parse("memobench fib --end 187");
        let Command::Fib(fib) = args.command else {
            panic!("expected fib subcommand");
        };
        assert!(fib.validate().is_err());
    }
}
