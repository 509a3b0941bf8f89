//! Payload module for the benchmark fixtures
//!
//! This module provides the three record shapes exercised by every trial and
//! the factory functions that build their fixed fixture values.
//!
//! Every record carries the annotations of all supported formats at once:
//! `prost` field tags for the binary format, `serde` attributes for the text
//! format and `bincode` derives for the compact binary format. Fixture values
//! are compile-time constants, so repeated runs encode identical content.

pub mod payload_types;
pub mod payload_fixtures;
pub(crate) mod payload_utils;

// Re-export main types for convenience
pub use payload_types::{BenchLarge, BenchMedium, BenchSmall, Payload, SizeClass};
pub use payload_fixtures::{large, medium, small};

/// Fixture constants
pub mod constants {
    //! Constants used by the fixture factories

    /// Action of the small fixture
    pub const SMALL_ACTION: &str = "benchmark";

    /// Key of the small fixture (15 bytes)
    pub const SMALL_KEY: &[u8] = b"data to be sent";

    /// Name shared by the medium and large fixtures
    pub const TESTER_NAME: &str = "Tester";

    /// Age shared by the medium and large fixtures
    pub const TESTER_AGE: i32 = 20;

    /// Height shared by the medium and large fixtures
    pub const TESTER_HEIGHT: f32 = 5.8;

    /// Weight shared by the medium and large fixtures
    pub const TESTER_WEIGHT: f32 = 180.7;
}
