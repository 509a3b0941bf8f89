//! Correctness probe run before the timed trials
//!
//! For every size class and format the probe encodes the fixture once,
//! decodes it back, compares it with the input record and records the buffer
//! efficiency of the encoding. A failure in one format never stops the
//! probing of the others.

use std::io::{self, Write};

use tracing::warn;

use crate::codec::{Codec, Format};
use crate::error::{CodecError, CodecResult};
use crate::payload::{BenchLarge, BenchMedium, BenchSmall, Payload, SizeClass};
use crate::report::EfficiencyReport;

/// Reports and failures collected by [`run_probe`]
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    /// Efficiency of every successful round trip
    pub reports: Vec<EfficiencyReport>,
    /// Every failed round trip
    pub failures: Vec<CodecError>,
}

/// Round-trip the fixture of `R` through `format`
pub fn probe_record<R: Payload>(format: Format) -> CodecResult<EfficiencyReport> {
    let codec = format.codec::<R>();
    let buffer = codec.round_trip(&R::fixture())?;
    Ok(EfficiencyReport::from_buffer(R::SIZE, &buffer))
}

/// Round-trip the fixture of `size` through `format`
pub fn probe(size: SizeClass, format: Format) -> CodecResult<EfficiencyReport> {
    match size {
        SizeClass::Small => probe_record::<BenchSmall>(format),
        SizeClass::Medium => probe_record::<BenchMedium>(format),
        SizeClass::Large => probe_record::<BenchLarge>(format),
    }
}

/// Probe every size class for every format, writing text lines when `out` is given
pub fn run_probe(formats: &[Format], mut out: Option<&mut dyn Write>) -> io::Result<ProbeOutcome> {
    let mut outcome = ProbeOutcome::default();

    for size in SizeClass::all() {
        if let Some(out) = out.as_deref_mut() {
            writeln!(out, "{} ---------", section_title(size))?;
        }
        for &format in formats {
            match probe(size, format) {
                Ok(report) => {
                    if let Some(out) = out.as_deref_mut() {
                        writeln!(out, "{}", report)?;
                    }
                    outcome.reports.push(report);
                }
                Err(error) => {
                    warn!(%format, %size, %error, "correctness probe failed");
                    if let Some(out) = out.as_deref_mut() {
                        writeln!(out, "Type: {:<10} probe failed: {}", format, error)?;
                    }
                    outcome.failures.push(error);
                }
            }
        }
        if let Some(out) = out.as_deref_mut() {
            writeln!(out)?;
        }
    }

    Ok(outcome)
}

fn section_title(size: SizeClass) -> &'static str {
    match size {
        SizeClass::Small => "Small",
        SizeClass::Medium => "Medium",
        SizeClass::Large => "Large",
    }
}
