//! Progress accounting for pipeline runs.
//!
//! Counters are owned by whoever produced the work and merged
//! single-threaded where results are collected. This avoids locks inside
//! workers, atomics, and false sharing. A snapshot freezes the totals at
//! pipeline end.

use std::time::Duration;

use serde::Serialize;

/// Mutable counters collected during a pipeline run.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressCounters {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub units_completed: u64,
}

impl ProgressCounters {
    /// Record one completed chunk or segment.
    pub fn add_unit(&mut self, bytes_in: usize, bytes_out: usize) {
        self.bytes_in += bytes_in as u64;
        self.bytes_out += bytes_out as u64;
        self.units_completed += 1;
    }

    pub fn merge(&mut self, other: &ProgressCounters) {
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.units_completed += other.units_completed;
    }
}

/// Immutable totals for one finished run.
#[derive(Clone, Debug, Serialize)]
pub struct ProgressSnapshot {
    pub mode: &'static str,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub units_completed: u64,
    pub elapsed_ms: u128,
}

impl ProgressSnapshot {
    pub fn from_counters(
        mode: &'static str,
        counters: &ProgressCounters,
        elapsed: Duration,
    ) -> Self {
        Self {
            mode,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            units_completed: counters.units_completed,
            elapsed_ms: elapsed.as_millis(),
        }
    }
}
