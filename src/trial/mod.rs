//! Trial module for timed, allocation-accounted benchmark batches
//!
//! A [`Trial`] names a batch and its [`Budget`]; the [`TrialRunner`] executes
//! it against an injected [`Measurer`] and produces a [`TrialSummary`].
//!
//! # Examples
//!
//! ```rust
//! use protobench::trial::{Budget, Trial, TrialRunner};
//!
//! let mut runner = TrialRunner::new();
//! let trial = Trial::new("sum").with_budget(Budget::Iterations(1_000));
//! let summary = runner.run(&trial, || vec![1u64, 2, 3], |v| Ok::<u64, String>(v.iter().sum()))?;
//! assert_eq!(summary.iterations, 1_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod counting_alloc;
pub mod measurer;
pub mod trial_runner;
pub mod trial_summary;

// Re-export main types for convenience
pub use counting_alloc::{AllocSnapshot, CountingAllocator};
pub use measurer::{Measurer, Sample, WallClock};
pub use trial_runner::{Budget, Trial, TrialRunner, MAX_ITERATIONS};
pub use trial_summary::TrialSummary;
