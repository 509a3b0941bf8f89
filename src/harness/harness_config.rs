//! Harness configuration

use std::time::Duration;

use serde::Serialize;

use super::filter::TrialFilter;
use crate::codec::Format;
use crate::error::{Error, Result};
use crate::trial::Budget;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One line per probe and per trial
    #[default]
    Text,
    /// A single JSON document at the end of the run
    Json,
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// `/`-separated trial name filter, all trials when absent
    pub filter: Option<String>,
    /// Iteration budget of every trial
    pub budget: Budget,
    /// Report allocations per iteration
    pub report_allocs: bool,
    /// Formats to exercise, in report order
    pub formats: Vec<Format>,
    /// Run the correctness probe before the trials
    pub probe: bool,
    /// Output rendering
    pub output: OutputMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            filter: None,
            budget: Budget::Duration(Duration::from_secs(1)),
            report_allocs: false,
            formats: Format::all().to_vec(),
            probe: true,
            output: OutputMode::Text,
        }
    }
}

impl HarnessConfig {
    /// Check the configuration and compile its filter
    pub fn validate(&self) -> Result<TrialFilter> {
        if self.formats.is_empty() {
            return Err(Error::Configuration {
                message: "at least one format is required".to_string(),
            });
        }
        if self.budget == Budget::Duration(Duration::ZERO) {
            return Err(Error::Configuration {
                message: "bench time must be greater than zero".to_string(),
            });
        }
        match &self.filter {
            Some(pattern) => TrialFilter::new(pattern),
            None => Ok(TrialFilter::all()),
        }
    }
}
