//! Timed runs of both workloads

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use memocache::{
    fibonacci_lru, range_sum_uncached, update_uncached, BoundedCache, RangeSumCache, StatsSnapshot,
};
use splaymemo::{fibonacci_via_splay, SplayTree};
use tracing::debug;

use crate::workload::{Query, Workload};

/// Outcome of running one range-sum workload with and without the cache
#[derive(Debug, Clone)]
pub struct RangeRun {
    pub uncached: Duration,
    pub cached: Duration,
    /// Wrapping sum of every range answer, identical for both runs
    pub checksum: u64,
    pub stats: StatsSnapshot,
}

/// Run `workload` uncached, then through a [`RangeSumCache`]
///
/// Each run starts from its own copy of the initial array.
pub fn run_range(workload: &Workload, capacity: usize) -> Result<RangeRun> {
    let mut array = workload.array.clone();
    let start = Instant::now();
    let mut uncached_sum = 0u64;
    for query in &workload.queries {
        match *query {
            Query::Range { left, right } => {
                let sum = range_sum_uncached(&array, left, right)?;
                uncached_sum = uncached_sum.wrapping_add(sum);
            }
            Query::Update { index, value } => update_uncached(&mut array, index, value)?,
        }
    }
    let uncached = start.elapsed();
    debug!(elapsed_ms = uncached.as_millis() as u64, "uncached run finished");

    let mut array = workload.array.clone();
    let mut cache = RangeSumCache::new(capacity);
    let start = Instant::now();
    let mut cached_sum = 0u64;
    for query in &workload.queries {
        match *query {
            Query::Range { left, right } => {
                let sum = cache.range_sum(&array, left, right)?;
                cached_sum = cached_sum.wrapping_add(sum);
            }
            Query::Update { index, value } => cache.update(&mut array, index, value)?,
        }
    }
    let cached = start.elapsed();
    debug!(elapsed_ms = cached.as_millis() as u64, "cached run finished");

    ensure!(
        uncached_sum == cached_sum,
        "cached answers diverged: {} vs {}",
        cached_sum,
        uncached_sum
    );

    Ok(RangeRun {
        uncached,
        cached,
        checksum: cached_sum,
        stats: cache.stats().snapshot(),
    })
}

/// Average timings for one Fibonacci argument
#[derive(Debug, Clone, PartialEq)]
pub struct FibSample {
    pub n: u64,
    pub value: u128,
    /// Mean seconds per cold run with a fresh LRU cache
    pub lru_secs: f64,
    /// Mean seconds per cold run with a fresh splay tree
    pub splay_secs: f64,
}

/// Time cold `fib(n)` runs for every `n` in `args`
///
/// `capacity` bounds the LRU; `None` sizes it to hold every subresult.
pub fn run_fib(args: &[u64], repeats: u32, capacity: Option<usize>) -> Result<Vec<FibSample>> {
    ensure!(repeats > 0, "repeats must be at least 1");

    let mut samples = Vec::with_capacity(args.len());
    for &n in args {
        let capacity = capacity.unwrap_or(n as usize + 1);

        let mut lru_total = Duration::ZERO;
        let mut lru_value = 0;
        for _ in 0..repeats {
            let mut cache = BoundedCache::new(capacity);
            let start = Instant::now();
            lru_value = fibonacci_lru(n, &mut cache)?;
            lru_total += start.elapsed();
        }

        let mut splay_total = Duration::ZERO;
        let mut splay_value = 0;
        for _ in 0..repeats {
            let mut tree = SplayTree::new();
            let start = Instant::now();
            splay_value = fibonacci_via_splay(n, &mut tree)?;
            splay_total += start.elapsed();
        }

        ensure!(
            lru_value == splay_value,
            "fib({}) disagrees: lru {} vs splay {}",
            n,
            lru_value,
            splay_value
        );
        debug!(n, value = %splay_value, "fibonacci sample");

        samples.push(FibSample {
            n,
            value: splay_value,
            lru_secs: lru_total.as_secs_f64() / f64::from(repeats),
            splay_secs: splay_total.as_secs_f64() / f64::from(repeats),
        });
    }

    Ok(samples)
}
