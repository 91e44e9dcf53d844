//! Table and JSON rendering of benchmark results

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::runner::{FibSample, RangeRun};
use crate::workload::WorkloadConfig;

/// Serializable summary of a range-sum run
#[derive(Debug, Serialize)]
pub struct RangeReport {
    pub config: WorkloadConfig,
    pub capacity: usize,
    pub seed: u64,
    pub uncached_secs: f64,
    pub cached_secs: f64,
    pub checksum: u64,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub hit_ratio: f64,
}

impl RangeReport {
    pub fn new(config: WorkloadConfig, capacity: usize, seed: u64, run: &RangeRun) -> Self {
        Self {
            config,
            capacity,
            seed,
            uncached_secs: run.uncached.as_secs_f64(),
            cached_secs: run.cached.as_secs_f64(),
            checksum: run.checksum,
            hits: run.stats.hits,
            misses: run.stats.misses,
            inserts: run.stats.inserts,
            evictions: run.stats.evictions,
            invalidations: run.stats.invalidations,
            hit_ratio: run.stats.hit_ratio,
        }
    }
}

/// One row of the Fibonacci comparison
#[derive(Debug, Serialize)]
pub struct FibRow {
    pub n: u64,
    /// Decimal string, since JSON numbers cannot hold a u128
    pub value: String,
    pub lru_secs: f64,
    pub splay_secs: f64,
}

impl From<&FibSample> for FibRow {
    fn from(sample: &FibSample) -> Self {
        Self {
            n: sample.n,
            value: sample.value.to_string(),
            lru_secs: sample.lru_secs,
            splay_secs: sample.splay_secs,
        }
    }
}

/// Workload-specific part of a report
#[derive(Debug, Serialize)]
#[serde(tag = "workload", rename_all = "snake_case")]
pub enum ReportBody {
    Range(RangeReport),
    Fibonacci { repeats: u32, rows: Vec<FibRow> },
}

/// Report written by `--json`
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    #[serde(flatten)]
    pub body: ReportBody,
}

impl Report {
    pub fn new(body: ReportBody) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            body,
        }
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let header: Vec<Cell> = header
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header);
    table
}

/// Timing and hit statistics for a range-sum run
pub fn range_table(report: &RangeReport) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    let speedup = if report.cached_secs > 0.0 {
        format!("{:.2}x", report.uncached_secs / report.cached_secs)
    } else {
        "-".to_string()
    };

    let rows = [
        ("Without cache (s)", format!("{:.6}", report.uncached_secs)),
        ("With LRU cache (s)", format!("{:.6}", report.cached_secs)),
        ("Speedup", speedup),
        ("Cache capacity", report.capacity.to_string()),
        ("Hits", report.hits.to_string()),
        ("Misses", report.misses.to_string()),
        ("Hit ratio", format!("{:.2}%", report.hit_ratio * 100.0)),
        ("Inserts", report.inserts.to_string()),
        ("Evictions", report.evictions.to_string()),
        ("Invalidations", report.invalidations.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }
    table
}

/// Per-argument average timings, LRU against splay tree
pub fn fib_table(rows: &[FibRow]) -> Table {
    let mut table = new_table(&["n", "LRU Cache Time (s)", "Splay Tree Time (s)"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.n),
            Cell::new(format!("{:.6}", row.lru_secs)),
            Cell::new(format!("{:.6}", row.splay_secs)),
        ]);
    }
    table
}
