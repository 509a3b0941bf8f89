//! Aggregated result of one trial

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::measurer::Sample;
use crate::utils::per_op;

/// Outcome of a timed batch of iterations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    /// Trial name, `op/format/size`
    pub name: String,
    /// Iterations executed in the measured window
    pub iterations: u64,
    /// Iterations whose operation returned an error
    pub failed: u64,
    /// Wall-clock time of the measured window in nanoseconds
    pub elapsed_ns: u64,
    /// Heap allocations in the window, when allocation reporting is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<u64>,
    /// Bytes allocated in the window, when allocation reporting is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_bytes: Option<u64>,
}

impl TrialSummary {
    /// Summary of a trial that ran no iterations
    pub fn empty(name: impl Into<String>, report_allocs: bool) -> Self {
        Self {
            name: name.into(),
            iterations: 0,
            failed: 0,
            elapsed_ns: 0,
            allocations: report_allocs.then_some(0),
            allocated_bytes: report_allocs.then_some(0),
        }
    }

    /// Build a summary from a measured window
    pub fn from_sample(name: impl Into<String>, iterations: u64, failed: u64, sample: Sample, report_allocs: bool) -> Self {
        Self {
            name: name.into(),
            iterations,
            failed,
            elapsed_ns: u64::try_from(sample.elapsed.as_nanos()).unwrap_or(u64::MAX),
            allocations: report_allocs.then_some(sample.allocations),
            allocated_bytes: report_allocs.then_some(sample.allocated_bytes),
        }
    }

    /// Elapsed wall-clock time
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }

    /// Mean nanoseconds per iteration, zero when nothing ran
    pub fn ns_per_op(&self) -> f64 {
        per_op(self.elapsed_ns, self.iterations)
    }

    /// Mean allocations per iteration
    pub fn allocs_per_op(&self) -> Option<f64> {
        self.allocations.map(|n| per_op(n, self.iterations))
    }

    /// Mean bytes allocated per iteration
    pub fn bytes_per_op(&self) -> Option<f64> {
        self.allocated_bytes.map(|n| per_op(n, self.iterations))
    }

    /// Throughput in operations per second, zero when nothing was timed
    pub fn ops_per_sec(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return 0.0;
        }
        self.iterations as f64 * 1e9 / self.elapsed_ns as f64
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<28} {:>10} {:>12.1} ns/op", self.name, self.iterations, self.ns_per_op())?;
        if let (Some(bytes), Some(allocs)) = (self.bytes_per_op(), self.allocs_per_op()) {
            write!(f, " {:>8.0} B/op {:>6.0} allocs/op", bytes, allocs)?;
        }
        if self.failed > 0 {
            write!(f, "  ({} failed)", self.failed)?;
        }
        Ok(())
    }
}
