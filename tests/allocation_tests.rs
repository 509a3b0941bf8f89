//! Allocation accounting with the counting allocator installed
//!
//! Tests in this binary run on parallel threads and the counters are
//! process-wide, so only lower bounds are asserted.

use protobench::codec::{Codec, Format};
use protobench::harness::{Harness, HarnessConfig};
use protobench::payload::{self, BenchLarge, BenchSmall};
use protobench::trial::{Budget, CountingAllocator, Measurer, Trial, TrialRunner, WallClock};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::new();

#[test]
fn test_counting_allocator_is_detected() {
    assert!(CountingAllocator::is_installed());
    assert!(WallClock::new().counts_allocations());
}

#[test]
fn test_encode_allocations_are_counted() {
    let mut runner = TrialRunner::new();
    let trial = Trial::new("encode/json/small")
        .with_budget(Budget::Iterations(100))
        .with_report_allocs(true);
    let codec = Format::Json.codec::<BenchSmall>();

    let summary = runner.run(&trial, payload::small, |record| codec.encode(record)).unwrap();
    assert!(summary.allocs_per_op().unwrap() >= 1.0);
    assert!(summary.bytes_per_op().unwrap() >= 1.0);
}

#[test]
fn test_decode_allocations_are_counted() {
    let mut runner = TrialRunner::new();
    let trial = Trial::new("decode/protobuf/large")
        .with_budget(Budget::Iterations(50))
        .with_report_allocs(true);
    let codec = Format::Protobuf.codec::<BenchLarge>();

    let summary = runner
        .run(
            &trial,
            || codec.encode(&payload::large()).unwrap().into_bytes(),
            |bytes: &Vec<u8>| codec.decode(bytes),
        )
        .unwrap();
    // name, desc, nickname and data each own a heap buffer
    assert!(summary.allocs_per_op().unwrap() >= 4.0);
}

#[test]
fn test_zero_iterations_report_zero_allocations() {
    let mut runner = TrialRunner::new();
    let trial = Trial::new("encode/protobuf/small")
        .with_budget(Budget::Iterations(0))
        .with_report_allocs(true);

    let summary = runner
        .run(&trial, || vec![0u8; 1024], |v| Ok::<usize, String>(v.len()))
        .unwrap();
    assert_eq!(summary.allocations, Some(0));
    assert_eq!(summary.allocated_bytes, Some(0));
    assert_eq!(summary.allocs_per_op(), Some(0.0));
}

#[test]
fn test_harness_reports_allocations() {
    let config = HarnessConfig {
        filter: Some("encode/bincode/medium".to_string()),
        budget: Budget::Iterations(20),
        report_allocs: true,
        probe: false,
        ..Default::default()
    };
    let mut harness = Harness::new(config).unwrap();
    let mut out = Vec::new();
    let report = harness.run(&mut out).unwrap();

    assert_eq!(report.trials.len(), 1);
    assert!(report.trials[0].allocations.unwrap() >= 20);
    assert!(String::from_utf8(out).unwrap().contains("allocs/op"));
}
