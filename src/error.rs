//! Error types for protobench
//!
//! This module provides a unified error handling system using `thiserror` for
//! the codec adapters, the trial runner and the run orchestration.

use thiserror::Error;

use crate::codec::Format;

/// The main error type for protobench
#[derive(Error, Debug)]
pub enum Error {
    /// Codec adapter errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Timing or allocation accounting errors
    #[error("Measurement error: {0}")]
    Measurement(#[from] MeasurementError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was wrong with the configuration
        message: String,
    },

    /// One or more correctness probes failed
    #[error("Correctness probe failed for {failures} format/size pair(s)")]
    Probe {
        /// Number of failed format/size pairs
        failures: usize,
    },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Codec-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The record could not be serialized
    #[error("Encoding failed ({format}): {reason}")]
    Encoding {
        /// Format whose codec failed
        format: Format,
        /// Message from the underlying library
        reason: String,
    },

    /// The bytes could not be deserialized
    #[error("Decoding failed ({format}): {reason}")]
    Decoding {
        /// Format whose codec failed
        format: Format,
        /// Message from the underlying library
        reason: String,
    },

    /// A decoded record differs from the record that was encoded
    #[error("Round trip mismatch ({format}): {reason}")]
    Mismatch {
        /// Format whose codec failed
        format: Format,
        /// Message from the underlying library
        reason: String,
    },
}

impl CodecError {
    /// The format whose codec produced this error
    pub fn format(&self) -> Format {
        match self {
            Self::Encoding { format, .. }
            | Self::Decoding { format, .. }
            | Self::Mismatch { format, .. } => *format,
        }
    }
}

/// Measurement-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasurementError {
    /// `stop` was called before `reset`
    #[error("Measurement stopped before it was started")]
    NotStarted,

    /// Allocation reporting was requested without the counting allocator
    #[error("Allocation reporting requires CountingAllocator as the global allocator")]
    AllocatorNotInstalled,
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Codec Results
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Convenience type alias for Measurement Results
pub type MeasureResult<T> = std::result::Result<T, MeasurementError>;
