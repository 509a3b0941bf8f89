//! Command line runner for the protobuf vs. JSON benchmarks

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use protobench::codec::Format;
use protobench::error::Error;
use protobench::harness::{Harness, HarnessConfig, OutputMode};
use protobench::trial::{Budget, CountingAllocator};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::new();

/// Encode/decode benchmarks across protobuf, JSON and bincode
#[derive(Debug, Parser)]
#[command(name = "protobench", version, about)]
struct Args {
    /// Trial filter, `/`-separated regexes over `op/format/size`
    filter: Option<String>,

    /// Run exactly N iterations per trial
    #[arg(short = 'n', long, conflicts_with = "bench_time")]
    iterations: Option<u64>,

    /// Grow each trial until it lasts this long (e.g. 500ms, 2s, 1m 30s)
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    bench_time: std::time::Duration,

    /// Report allocations per iteration
    #[arg(long)]
    benchmem: bool,

    /// Formats to exercise
    #[arg(long, value_delimiter = ',', default_values = ["json", "protobuf", "bincode"])]
    formats: Vec<Format>,

    /// Skip the correctness probe
    #[arg(long)]
    skip_probe: bool,

    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    output: OutputMode,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> HarnessConfig {
        let budget = match self.iterations {
            Some(n) => Budget::Iterations(n),
            None => Budget::Duration(self.bench_time),
        };
        HarnessConfig {
            filter: self.filter,
            budget,
            report_allocs: self.benchmem,
            formats: self.formats,
            probe: !self.skip_probe,
            output: self.output,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    execute(args, &mut stdout.lock())
}

fn execute<W: Write>(args: Args, out: &mut W) -> color_eyre::Result<ExitCode> {
    let filter = args.filter.clone();
    let mut harness = Harness::new(args.into_config()).wrap_err("invalid configuration")?;
    let report = harness.run(out).wrap_err("benchmark run aborted")?;

    if !report.is_success() {
        let failures = report.probe_failures.len();
        eprintln!("{}", Error::Probe { failures });
        for failure in &report.probe_failures {
            eprintln!("  {}", failure);
        }
        return Ok(ExitCode::FAILURE);
    }
    if report.trials.is_empty() {
        warn!(filter = filter.as_deref().unwrap_or(""), "no trials matched the filter");
    }
    Ok(ExitCode::SUCCESS)
}
