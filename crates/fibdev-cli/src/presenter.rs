//! CLI result presenter.
//!
//! Every method writes to a caller-supplied sink so output can be captured
//! in tests; the binary passes a locked stdout.

use std::io::{self, Write};

use fibdev_bench::{ClientLog, LatencySample, PerfReport};
use fibdev_core::AlgorithmVariant;

use crate::output::{format_nanos, format_number, format_value};

/// Name the smoke client prints for the device.
pub const DEVICE_NAME: &str = "/dev/fibonacci";

/// CLI result presenter.
pub struct CliPresenter {
    quiet: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the smoke client transcript.
    pub fn present_client(&self, log: &ClientLog, out: &mut dyn Write) -> io::Result<()> {
        for written in &log.writes {
            writeln!(
                out,
                "Writing to {DEVICE_NAME}, returned the sequence {written}"
            )?;
        }
        for (offset, value) in log.forward.iter().chain(&log.backward) {
            writeln!(
                out,
                "Reading from {DEVICE_NAME} at offset {offset}, returned the sequence {value}."
            )?;
        }
        Ok(())
    }

    /// Print a single read, with its device-side latency if one was taken.
    pub fn present_read(
        &self,
        variant: AlgorithmVariant,
        index: u32,
        value: i64,
        latency_ns: Option<i64>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        if self.quiet {
            return writeln!(out, "{value}");
        }
        writeln!(out, "Variant: {variant}")?;
        writeln!(out, "F({index}) = {}", format_value(value))?;
        if let Some(ns) = latency_ns {
            writeln!(out, "Latency: {ns}ns")?;
        }
        Ok(())
    }

    /// Print a sweep as `index nanos` lines.
    pub fn present_sweep(&self, samples: &[LatencySample], out: &mut dyn Write) -> io::Result<()> {
        for s in samples {
            writeln!(out, "{} {}", s.index, s.nanos)?;
        }
        Ok(())
    }

    /// Print a perf report as one row per index plus the per-series means.
    pub fn present_report(&self, report: &PerfReport, out: &mut dyn Write) -> io::Result<()> {
        if !self.quiet {
            writeln!(
                out,
                "Runs: {}  Threshold: {}  CPU: {}",
                format_number(report.runs as u64),
                report.threshold,
                if report.host.cpu_model.is_empty() {
                    "unknown"
                } else {
                    &report.host.cpu_model
                }
            )?;
        }

        write!(out, "{:>5}", "index")?;
        for s in &report.series {
            write!(out, " {:>16}", s.label)?;
        }
        writeln!(out)?;

        for (col, index) in report.indices.iter().enumerate() {
            write!(out, "{index:>5}")?;
            for s in &report.series {
                let cell = s.nanos.get(col).map_or_else(String::new, |v| format!("{v:.1}"));
                write!(out, " {cell:>16}")?;
            }
            writeln!(out)?;
        }

        if !self.quiet {
            writeln!(out, "\nMeans:")?;
            writeln!(out, "{:-<40}", "")?;
            for s in &report.series {
                writeln!(out, "  {:<20} {:>14}", s.label, format_nanos(s.mean))?;
            }
        }
        Ok(())
    }

    /// Print the outcome of a successful verification.
    pub fn present_verify(&self, checked: usize, out: &mut dyn Write) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            out,
            "Verified {} values: all variants agree",
            format_number(checked as u64)
        )
    }
}
