//! # protobench
//!
//! A measurement harness comparing a schema-based binary format (Protocol
//! Buffers) with a generic text format (JSON) across three fixed payload shapes.
//!
//! ## Modules
//!
//! - **Payload Module**: the small, medium and large fixture records
//! - **Codec Module**: encode/decode adapters, one per serialization format
//! - **Trial Module**: timed trials with allocation accounting
//! - **Report Module**: used/allocated efficiency of encoded buffers
//! - **Harness Module**: trial matrix, name filtering and the correctness probe
//!
//! ## Example
//!
//! ```rust
//! use protobench::codec::{Codec, Format};
//! use protobench::payload::{self, BenchSmall};
//!
//! let codec = Format::Protobuf.codec::<BenchSmall>();
//! let encoded = codec.encode(&payload::small())?;
//! let decoded = codec.decode(encoded.as_bytes())?;
//! assert_eq!(decoded, payload::small());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod error;
pub mod payload;
pub mod codec;
pub mod trial;
pub mod report;
pub mod harness;

// Utility modules
mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::error::{CodecError, Error, MeasurementError, Result};
    pub use crate::codec::{Codec, EncodedBuffer, Format};
    pub use crate::payload::{BenchLarge, BenchMedium, BenchSmall, Payload, SizeClass};
    pub use crate::report::EfficiencyReport;
    pub use crate::trial::{Budget, CountingAllocator, Measurer, Trial, TrialRunner, TrialSummary, WallClock};
    pub use crate::harness::{Harness, HarnessConfig};
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
