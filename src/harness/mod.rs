//! Harness module orchestrating a benchmark run
//!
//! A run has two phases:
//!
//! 1. the correctness probe, which round-trips every fixture through every
//!    selected format once and prints its used/allocated efficiency;
//! 2. the timed trials, one per selected `op/format/size` triple.
//!
//! Probe failures are collected and reported; they never prevent the other
//! formats from being probed or benchmarked. Measurement errors abort the run.

pub mod filter;
pub mod harness_config;
pub mod probe;

// Re-export main types for convenience
pub use filter::TrialFilter;
pub use harness_config::{HarnessConfig, OutputMode};
pub use probe::{probe, run_probe, ProbeOutcome};

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::codec::{Codec, Format};
use crate::error::Result;
use crate::payload::{BenchLarge, BenchMedium, BenchSmall, Payload, SizeClass};
use crate::report::EfficiencyReport;
use crate::trial::{Measurer, Trial, TrialRunner, TrialSummary, WallClock};

/// Operation exercised by a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record to bytes
    Encode,
    /// Bytes to record
    Decode,
}

impl Operation {
    /// All operations in run order
    pub const fn all() -> [Operation; 2] {
        [Operation::Encode, Operation::Decode]
    }

    /// Label used in trial names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One `op/format/size` triple of the trial matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrialSpec {
    /// Operation
    pub op: Operation,
    /// Format
    pub format: Format,
    /// Payload size class
    pub size: SizeClass,
}

impl TrialSpec {
    /// Trial name, `op/format/size`
    pub fn name(&self) -> String {
        format!("{}/{}/{}", self.op, self.format, self.size)
    }
}

/// Everything a run produced
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Efficiency lines of the correctness probe
    pub probe: Vec<EfficiencyReport>,
    /// Failed probes, rendered
    pub probe_failures: Vec<String>,
    /// Trial summaries in run order
    pub trials: Vec<TrialSummary>,
}

impl RunReport {
    /// Whether every probe passed
    pub fn is_success(&self) -> bool {
        self.probe_failures.is_empty()
    }
}

/// Benchmark run orchestrator
pub struct Harness<M: Measurer = WallClock> {
    config: HarnessConfig,
    filter: TrialFilter,
    runner: TrialRunner<M>,
}

impl Harness<WallClock> {
    /// Create a harness measuring wall-clock time
    pub fn new(config: HarnessConfig) -> Result<Self> {
        Self::with_runner(config, TrialRunner::new())
    }
}

impl<M: Measurer> Harness<M> {
    /// Create a harness with a custom trial runner
    pub fn with_runner(config: HarnessConfig, runner: TrialRunner<M>) -> Result<Self> {
        let filter = config.validate()?;
        Ok(Self { config, filter, runner })
    }

    /// The run configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Selected trials in run order: operation, then format, then size
    pub fn plan(&self) -> Vec<TrialSpec> {
        let mut specs = Vec::new();
        for op in Operation::all() {
            for &format in &self.config.formats {
                for size in SizeClass::all() {
                    let spec = TrialSpec { op, format, size };
                    if self.filter.matches(&spec.name()) {
                        specs.push(spec);
                    }
                }
            }
        }
        specs
    }

    /// Run a single trial of the matrix
    pub fn run_trial(&mut self, spec: &TrialSpec) -> Result<TrialSummary> {
        match spec.size {
            SizeClass::Small => self.run_typed::<BenchSmall>(spec),
            SizeClass::Medium => self.run_typed::<BenchMedium>(spec),
            SizeClass::Large => self.run_typed::<BenchLarge>(spec),
        }
    }

    fn run_typed<R: Payload>(&mut self, spec: &TrialSpec) -> Result<TrialSummary> {
        let codec = spec.format.codec::<R>();
        self.run_codec(spec.op, codec.as_ref())
    }

    /// Time `op` of `codec` on the fixture of `R`
    ///
    /// Decode trials encode their input up front; when that fails the trial
    /// is not run and the codec error is returned.
    pub fn run_codec<R: Payload>(&mut self, op: Operation, codec: &dyn Codec<R>) -> Result<TrialSummary> {
        let spec = TrialSpec { op, format: codec.format(), size: R::SIZE };
        let trial = Trial::new(spec.name())
            .with_budget(self.config.budget)
            .with_report_allocs(self.config.report_allocs);

        let summary = match op {
            Operation::Encode => self.runner.run(&trial, R::fixture, |record| codec.encode(record))?,
            Operation::Decode => {
                let input = codec.encode(&R::fixture()).map_err(|error| {
                    warn!(trial = %trial.name, %error, "could not prepare decode input");
                    error
                })?;
                let bytes = input.into_bytes();
                self.runner.run(&trial, move || bytes, |bytes: &Vec<u8>| codec.decode(bytes))?
            }
        };
        Ok(summary)
    }

    /// Run the probe (when enabled) and every selected trial, writing the report to `out`
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunReport> {
        let text = self.config.output == OutputMode::Text;
        let mut report = RunReport::default();

        if self.config.probe {
            info!(formats = self.config.formats.len(), "running correctness probe");
            let sink: Option<&mut dyn Write> = if text { Some(&mut *out as &mut dyn Write) } else { None };
            let outcome = run_probe(&self.config.formats, sink)?;
            report.probe = outcome.reports;
            report.probe_failures = outcome.failures.iter().map(ToString::to_string).collect();
        }

        let plan = self.plan();
        info!(trials = plan.len(), budget = %self.config.budget, "running trials");
        for spec in &plan {
            let summary = self.run_trial(spec)?;
            if text {
                writeln!(out, "{}", summary)?;
            }
            report.trials.push(summary);
        }

        if !text {
            serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::from)?;
            writeln!(out)?;
        }
        out.flush()?;

        Ok(report)
    }
}
