//! # fibdev-bench
//!
//! Latency sweeps, repeated perf runs, and cross-variant verification.

pub mod error;
pub mod io;
pub mod perf;
pub mod report;
pub mod stats;
pub mod sweep;
pub mod verify;

pub use error::BenchError;
pub use perf::{perf_run, NoOpRunObserver, PerfConfig, RunObserver};
pub use report::{PerfMode, PerfReport, Series};
pub use sweep::{client_run, ktime_sweep, utime_sweep, ClientLog, LatencySample};
pub use verify::verify_all_variants;
