//! Trial runner: timed batches with setup excluded from the measured window

use std::fmt;
use std::hint::black_box;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::measurer::{Measurer, Sample, WallClock};
use super::trial_summary::TrialSummary;
use crate::error::{MeasureResult, MeasurementError};

/// Upper bound on iterations of a single measured round
pub const MAX_ITERATIONS: u64 = 1_000_000_000;

/// How long a trial runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    /// Exactly this many iterations
    Iterations(u64),
    /// Grow the iteration count until one round lasts at least this long
    Duration(Duration),
}

impl Default for Budget {
    fn default() -> Self {
        Budget::Duration(Duration::from_secs(1))
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Iterations(n) => write!(f, "{}x", n),
            Budget::Duration(d) => write!(f, "{:?}", d),
        }
    }
}

/// A named batch of repeated calls to one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// Trial name, reported verbatim
    pub name: String,
    /// Iteration budget
    pub budget: Budget,
    /// Report allocation counts for the measured window
    pub report_allocs: bool,
}

impl Trial {
    /// Create a trial with the default one second budget
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            budget: Budget::default(),
            report_allocs: false,
        }
    }

    /// Set the iteration budget
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Toggle allocation reporting
    pub fn with_report_allocs(mut self, report_allocs: bool) -> Self {
        self.report_allocs = report_allocs;
        self
    }
}

struct Round<E> {
    iterations: u64,
    failed: u64,
    sample: Sample,
    first_error: Option<E>,
}

/// Runs trials against an injected [`Measurer`]
#[derive(Debug, Default)]
pub struct TrialRunner<M: Measurer = WallClock> {
    measurer: M,
}

impl TrialRunner<WallClock> {
    /// Create a runner measuring wall-clock time
    pub fn new() -> Self {
        Self::with_measurer(WallClock::new())
    }
}

impl<M: Measurer> TrialRunner<M> {
    /// Create a runner with a custom measurer
    pub fn with_measurer(measurer: M) -> Self {
        Self { measurer }
    }

    /// Run `setup` once, then time `op` over the trial's budget
    ///
    /// Only the loop calling `op` is measured. An iteration whose `op`
    /// returns an error is counted as failed and the batch continues.
    /// A zero iteration budget returns an empty summary without calling
    /// `setup` or `op`. Requesting allocation reports from a measurer that
    /// cannot count them fails with
    /// [`MeasurementError::AllocatorNotInstalled`] before anything runs.
    pub fn run<S, I, F, T, E>(&mut self, trial: &Trial, setup: S, mut op: F) -> MeasureResult<TrialSummary>
    where
        S: FnOnce() -> I,
        F: FnMut(&I) -> Result<T, E>,
        E: fmt::Display,
    {
        if trial.report_allocs && !self.measurer.counts_allocations() {
            return Err(MeasurementError::AllocatorNotInstalled);
        }
        debug!(trial = %trial.name, budget = %trial.budget, "starting trial");

        let round = match trial.budget {
            Budget::Iterations(0) => {
                return Ok(TrialSummary::empty(trial.name.clone(), trial.report_allocs));
            }
            Budget::Iterations(n) => {
                let input = setup();
                self.measure(n.min(MAX_ITERATIONS), &input, &mut op)?
            }
            Budget::Duration(target) => {
                let input = setup();
                self.measure_for(target, &input, &mut op)?
            }
        };

        if let Some(error) = &round.first_error {
            warn!(
                trial = %trial.name,
                failed = round.failed,
                iterations = round.iterations,
                "iterations failed: {}", error
            );
        }

        Ok(TrialSummary::from_sample(
            trial.name.clone(),
            round.iterations,
            round.failed,
            round.sample,
            trial.report_allocs,
        ))
    }

    fn measure_for<I, F, T, E>(&mut self, target: Duration, input: &I, op: &mut F) -> MeasureResult<Round<E>>
    where
        F: FnMut(&I) -> Result<T, E>,
    {
        let mut n = 1;
        loop {
            let round = self.measure(n, input, op)?;
            trace!(iterations = n, elapsed = ?round.sample.elapsed, "round finished");
            if round.sample.elapsed >= target || n >= MAX_ITERATIONS {
                return Ok(round);
            }
            n = predict_iterations(target, n, round.sample.elapsed);
        }
    }

    fn measure<I, F, T, E>(&mut self, iterations: u64, input: &I, op: &mut F) -> MeasureResult<Round<E>>
    where
        F: FnMut(&I) -> Result<T, E>,
    {
        let mut failed = 0;
        let mut first_error = None;

        self.measurer.reset()?;
        for _ in 0..iterations {
            match op(input) {
                Ok(output) => {
                    black_box(output);
                }
                Err(error) => {
                    failed += 1;
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
        let sample = self.measurer.stop()?;

        Ok(Round {
            iterations,
            failed,
            sample,
            first_error,
        })
    }
}

/// Next round size when the previous `last` iterations took `elapsed`
///
/// Aims 20% past the target, grows at most 100x and at least by one, and
/// never exceeds [`MAX_ITERATIONS`].
fn predict_iterations(target: Duration, last: u64, elapsed: Duration) -> u64 {
    let elapsed_ns = elapsed.as_nanos().max(1);
    let mut n = target.as_nanos().saturating_mul(u128::from(last)) / elapsed_ns;
    n += n / 5;
    let n = n
        .min(u128::from(last).saturating_mul(100))
        .max(u128::from(last) + 1)
        .min(u128::from(MAX_ITERATIONS));
    n as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Measurer that reports 100ns per call counted in `calls`
    struct FakeMeasurer {
        calls: Rc<Cell<u64>>,
        started_at: Option<u64>,
        fail_stop: bool,
    }

    impl FakeMeasurer {
        fn new(calls: Rc<Cell<u64>>) -> Self {
            Self { calls, started_at: None, fail_stop: false }
        }
    }

    impl Measurer for FakeMeasurer {
        fn reset(&mut self) -> MeasureResult<()> {
            self.started_at = Some(self.calls.get());
            Ok(())
        }

        fn stop(&mut self) -> MeasureResult<Sample> {
            if self.fail_stop {
                return Err(MeasurementError::NotStarted);
            }
            let start = self.started_at.take().ok_or(MeasurementError::NotStarted)?;
            let calls = self.calls.get() - start;
            Ok(Sample {
                elapsed: Duration::from_nanos(calls * 100),
                allocations: calls * 2,
                allocated_bytes: calls * 64,
            })
        }

        fn counts_allocations(&self) -> bool {
            true
        }
    }

    fn counting_op(calls: &Rc<Cell<u64>>) -> impl FnMut(&u64) -> Result<u64, String> {
        let calls = Rc::clone(calls);
        move |input| {
            calls.set(calls.get() + 1);
            Ok(*input)
        }
    }

    #[test]
    fn test_fixed_iterations() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TrialRunner::with_measurer(FakeMeasurer::new(Rc::clone(&calls)));
        let trial = Trial::new("encode/json/small")
            .with_budget(Budget::Iterations(50))
            .with_report_allocs(true);

        let summary = runner.run(&trial, || 7u64, counting_op(&calls)).unwrap();
        assert_eq!(summary.iterations, 50);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.elapsed(), Duration::from_nanos(5_000));
        assert_eq!(summary.allocs_per_op(), Some(2.0));
        assert_eq!(summary.bytes_per_op(), Some(64.0));
    }

    #[test]
    fn test_setup_is_excluded_from_window() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TrialRunner::with_measurer(FakeMeasurer::new(Rc::clone(&calls)));
        let trial = Trial::new("decode/json/large").with_budget(Budget::Iterations(10));
        let setup_calls = Rc::clone(&calls);

        let summary = runner
            .run(
                &trial,
                move || {
                    setup_calls.set(setup_calls.get() + 1_000);
                    0u64
                },
                counting_op(&calls),
            )
            .unwrap();
        assert_eq!(summary.elapsed(), Duration::from_nanos(1_000));
        assert_eq!(calls.get(), 1_010);
    }

    #[test]
    fn test_zero_iterations_is_empty() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TrialRunner::with_measurer(FakeMeasurer::new(Rc::clone(&calls)));
        let trial = Trial::new("encode/protobuf/small")
            .with_budget(Budget::Iterations(0))
            .with_report_allocs(true);
        let setup_ran = Cell::new(false);

        let summary = runner
            .run(&trial, || setup_ran.set(true), |_: &()| Ok::<(), String>(()))
            .unwrap();
        assert!(!setup_ran.get());
        assert_eq!(summary.iterations, 0);
        assert_eq!(summary.elapsed(), Duration::ZERO);
        assert_eq!(summary.allocations, Some(0));
        assert_eq!(summary.ns_per_op(), 0.0);
        assert_eq!(summary.allocs_per_op(), Some(0.0));
    }

    #[test]
    fn test_failed_iterations_do_not_abort() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TrialRunner::with_measurer(FakeMeasurer::new(Rc::clone(&calls)));
        let trial = Trial::new("decode/protobuf/medium").with_budget(Budget::Iterations(10));
        let op_calls = Rc::clone(&calls);

        let summary = runner
            .run(&trial, || (), move |_| {
                op_calls.set(op_calls.get() + 1);
                if op_calls.get() % 2 == 0 {
                    Err("truncated input".to_string())
                } else {
                    Ok(())
                }
            })
            .unwrap();
        assert_eq!(summary.iterations, 10);
        assert_eq!(summary.failed, 5);
    }

    #[test]
    fn test_duration_budget_scales_iterations() {
        let calls = Rc::new(Cell::new(0));
        let mut runner = TrialRunner::with_measurer(FakeMeasurer::new(Rc::clone(&calls)));
        let trial = Trial::new("encode/json/medium").with_budget(Budget::Duration(Duration::from_millis(1)));

        let summary = runner.run(&trial, || 1u64, counting_op(&calls)).unwrap();
        assert!(summary.iterations >= 10_000);
        assert!(summary.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn test_measurement_errors_are_fatal() {
        let calls = Rc::new(Cell::new(0));
        let mut measurer = FakeMeasurer::new(Rc::clone(&calls));
        measurer.fail_stop = true;
        let mut runner = TrialRunner::with_measurer(measurer);
        let trial = Trial::new("encode/json/small").with_budget(Budget::Iterations(3));

        let result = runner.run(&trial, || 0u64, counting_op(&calls));
        assert_eq!(result, Err(MeasurementError::NotStarted));
    }

    #[test]
    fn test_allocation_reporting_requires_counting_allocator() {
        let mut runner = TrialRunner::new();
        let trial = Trial::new("encode/json/small")
            .with_budget(Budget::Iterations(1))
            .with_report_allocs(true);

        let setup_ran = Cell::new(false);
        let result = runner.run(&trial, || setup_ran.set(true), |_| Ok::<(), String>(()));
        assert_eq!(result, Err(MeasurementError::AllocatorNotInstalled));
        assert!(!setup_ran.get());
    }

    #[test]
    fn test_predict_iterations() {
        let target = Duration::from_millis(1);
        assert_eq!(predict_iterations(target, 1, Duration::from_nanos(100)), 100);
        assert_eq!(predict_iterations(target, 100, Duration::from_micros(10)), 10_000);
        assert_eq!(predict_iterations(target, 10, Duration::from_millis(5)), 11);
        assert_eq!(predict_iterations(target, MAX_ITERATIONS, Duration::ZERO), MAX_ITERATIONS);
    }
}
