//! Random range-sum workloads

use rand::Rng;
use serde::Serialize;

/// Largest element value (and largest update value)
pub const MAX_ELEMENT: u32 = 100;

/// One step of a range-sum workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of `array[left..=right]`
    Range { left: usize, right: usize },
    /// Write `array[index] = value`
    Update { index: usize, value: u32 },
}

/// Shape of a generated workload
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorkloadConfig {
    pub array_size: usize,
    pub queries: usize,
    /// Probability that a step is an update rather than a range query
    pub update_ratio: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_size: 100_000,
            queries: 50_000,
            update_ratio: 0.3,
        }
    }
}

/// Initial array plus the query sequence to run against it
#[derive(Debug, Clone)]
pub struct Workload {
    pub array: Vec<u32>,
    pub queries: Vec<Query>,
}

impl Workload {
    /// Generate a workload; `array_size` must be non-zero
    pub fn generate<R: Rng>(config: &WorkloadConfig, rng: &mut R) -> Self {
        let n = config.array_size;
        let array = (0..n).map(|_| rng.gen_range(1..=MAX_ELEMENT)).collect();

        let queries = (0..config.queries)
            .map(|_| {
                if rng.gen_bool(config.update_ratio) {
                    Query::Update {
                        index: rng.gen_range(0..n),
                        value: rng.gen_range(1..=MAX_ELEMENT),
                    }
                } else {
                    let left = rng.gen_range(0..n);
                    let right = rng.gen_range(left..n);
                    Query::Range { left, right }
                }
            })
            .collect();

        Self { array, queries }
    }

    /// Number of update steps
    pub fn update_count(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| matches!(q, Query::Update { .. }))
            .count()
    }
}
