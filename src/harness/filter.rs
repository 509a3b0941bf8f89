//! Trial name filter
//!
//! Patterns are split on `/` and each level is an unanchored regular
//! expression matched against the same level of an `op/format/size` trial
//! name, so `encode/json` selects every JSON encode trial and `/proto/large`
//! selects both protobuf operations on the large payload.

use regex::Regex;

use crate::error::{Error, Result};

/// Compiled trial filter
#[derive(Debug, Clone, Default)]
pub struct TrialFilter {
    levels: Vec<Option<Regex>>,
}

impl TrialFilter {
    /// A filter that selects every trial
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile a `/`-separated pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let levels = pattern
            .split('/')
            .map(|level| {
                if level.is_empty() {
                    return Ok(None);
                }
                Regex::new(level).map(Some).map_err(|e| Error::Configuration {
                    message: format!("invalid filter '{}': {}", pattern, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { levels })
    }

    /// Whether `name` is selected
    pub fn matches(&self, name: &str) -> bool {
        let parts: Vec<&str> = name.split('/').collect();
        self.levels.iter().enumerate().all(|(i, level)| match (level, parts.get(i)) {
            (None, _) => true,
            (Some(re), Some(part)) => re.is_match(part),
            (Some(_), None) => false,
        })
    }
}
