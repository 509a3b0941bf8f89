//! Timing and allocation measurement capability

use std::time::{Duration, Instant};

use super::counting_alloc::{AllocSnapshot, CountingAllocator};
use crate::error::{MeasureResult, MeasurementError};

/// Measurements of one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    /// Wall-clock time of the window
    pub elapsed: Duration,
    /// Heap allocations made inside the window
    pub allocations: u64,
    /// Bytes requested by those allocations
    pub allocated_bytes: u64,
}

/// Timing and allocation accounting used by the trial runner
pub trait Measurer {
    /// Start measuring now, discarding anything measured so far
    fn reset(&mut self) -> MeasureResult<()>;

    /// Close the current window
    fn stop(&mut self) -> MeasureResult<Sample>;

    /// Whether [`Sample::allocations`] carries real counts
    fn counts_allocations(&self) -> bool;
}

/// Wall-clock measurer backed by `Instant` and [`CountingAllocator`]
#[derive(Debug)]
pub struct WallClock {
    counting: bool,
    started: Option<(Instant, AllocSnapshot)>,
}

impl WallClock {
    /// Create a measurer, detecting whether allocations can be counted
    pub fn new() -> Self {
        Self {
            counting: CountingAllocator::is_installed(),
            started: None,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Measurer for WallClock {
    fn reset(&mut self) -> MeasureResult<()> {
        let allocs = CountingAllocator::snapshot();
        self.started = Some((Instant::now(), allocs));
        Ok(())
    }

    fn stop(&mut self) -> MeasureResult<Sample> {
        let elapsed_at = Instant::now();
        let allocs = CountingAllocator::snapshot();
        let (start, start_allocs) = self.started.take().ok_or(MeasurementError::NotStarted)?;
        let delta = allocs.since(start_allocs);
        Ok(Sample {
            elapsed: elapsed_at.duration_since(start),
            allocations: delta.allocations,
            allocated_bytes: delta.bytes,
        })
    }

    fn counts_allocations(&self) -> bool {
        self.counting
    }
}
