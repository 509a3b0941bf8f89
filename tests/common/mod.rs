//! Shared helpers for the integration tests

#![allow(dead_code)]

use protobench::codec::{Codec, EncodedBuffer, Format};
use protobench::payload::{BenchLarge, BenchMedium, BenchSmall, Payload, SizeClass};

/// Encode the fixture of `size` with `format`
pub fn encode_fixture(format: Format, size: SizeClass) -> EncodedBuffer {
    match size {
        SizeClass::Small => encode_record::<BenchSmall>(format),
        SizeClass::Medium => encode_record::<BenchMedium>(format),
        SizeClass::Large => encode_record::<BenchLarge>(format),
    }
}

fn encode_record<R: Payload>(format: Format) -> EncodedBuffer {
    format
        .codec::<R>()
        .encode(&R::fixture())
        .unwrap_or_else(|e| panic!("encoding {} with {} failed: {}", R::SIZE, format, e))
}

/// Compare two byte arrays with detailed error reporting
pub fn assert_bytes_equal(actual: &[u8], expected: &[u8], context: &str) {
    if actual != expected {
        panic!(
            "Byte arrays differ in {}\nExpected: {}\nActual:   {}\nExpected (hex): {}\nActual (hex):   {}",
            context,
            expected.len(),
            actual.len(),
            hex::encode(expected),
            hex::encode(actual)
        );
    }
}
