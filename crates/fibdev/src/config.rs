//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fibdev_bench::perf::DEFAULT_RUNS;
use fibdev_bench::stats::DEFAULT_Z_THRESHOLD;
use fibdev_core::AlgorithmVariant;

/// fibdev: Fibonacci numbers F(0)..=F(92) behind a single-session device.
#[derive(Parser, Debug)]
#[command(name = "fibdev", version, about)]
pub struct AppConfig {
    /// Algorithm variant: 0-3 (clamped), or iterative, fast, fls, clz.
    #[arg(
        short,
        long,
        global = true,
        default_value = "0",
        env = "FIBDEV_METHOD"
    )]
    pub method: AlgorithmVariant,

    /// Quiet mode (data only).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to run against the device.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write, then read forward and backward over 0..=offset.
    Client {
        /// Highest offset visited.
        #[arg(long, default_value_t = 100)]
        offset: u32,
    },
    /// Open, seek to an index, and read one value.
    Read {
        /// Fibonacci index; clamped to 0..=92.
        #[arg(short, long, allow_negative_numbers = true)]
        index: i64,
        /// Capture and print the device-side latency.
        #[arg(long)]
        ktime: bool,
    },
    /// Device-side latency for every index.
    Ktime,
    /// Caller-side latency for every index.
    Utime,
    /// Repeated sweeps with outlier rejection.
    Perf {
        /// Sweeps per series.
        #[arg(long, default_value_t = DEFAULT_RUNS)]
        runs: usize,
        /// Compare the three fast-doubling variants instead of user vs device.
        #[arg(long)]
        compare: bool,
        /// Pin the benchmark thread to this core.
        #[arg(long)]
        cpu: Option<usize>,
        /// Z-score cutoff for outlier rejection.
        #[arg(long, default_value_t = DEFAULT_Z_THRESHOLD)]
        threshold: f64,
        /// Save the report as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check every variant against the iterative reference.
    Verify,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
