//! Space-efficiency reporting for encoded buffers
//!
//! The used/allocated ratio compares the logical output length of an encoder
//! with the capacity of the buffer it handed back, which shows how well the
//! encoder sizes its output buffer.

use std::fmt;

use serde::Serialize;

use crate::codec::{EncodedBuffer, Format};
use crate::payload::SizeClass;
use crate::utils::format_percent;

/// Used vs. allocated bytes of one encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyReport {
    /// Format that produced the encoding
    pub format: Format,
    /// Size class of the encoded record
    pub size: SizeClass,
    /// Logical output length
    pub used: usize,
    /// Buffer capacity
    pub allocated: usize,
    /// `used / allocated`, absent when nothing was allocated
    pub ratio: Option<f64>,
}

impl EfficiencyReport {
    /// Build a report from a sample encoding
    pub fn from_buffer(size: SizeClass, buffer: &EncodedBuffer) -> Self {
        Self {
            format: buffer.format(),
            size,
            used: buffer.used(),
            allocated: buffer.allocated(),
            ratio: buffer.efficiency(),
        }
    }

    /// Percentage of the allocation in use, `None` when undefined
    pub fn percent_used(&self) -> Option<f64> {
        self.ratio.map(|r| r * 100.0)
    }
}

impl fmt::Display for EfficiencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {:<10} Data size: {:<6} Total Allocated: {:<6} Used/Allocated: {}",
            self.format,
            self.used,
            self.allocated,
            format_percent(self.ratio)
        )
    }
}
