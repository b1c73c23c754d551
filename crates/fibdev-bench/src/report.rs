//! Serializable perf report.

use serde::{Deserialize, Serialize};

use fibdev_core::AlgorithmVariant;

use crate::stats;

/// Current report format version.
pub const REPORT_VERSION: u32 = 1;

/// What a perf run compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerfMode {
    /// Caller-side vs device-side latency for one variant.
    UserVsDevice,
    /// Device-side latency of the three fast-doubling variants.
    Compare,
}

/// One latency curve over the index domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Curve label (`user`, `device`, `overhead`, or a variant name).
    pub label: String,
    /// Variant measured, if the curve belongs to a single one.
    pub variant: Option<AlgorithmVariant>,
    /// Filtered mean latency per index, in nanoseconds.
    pub nanos: Vec<f64>,
    /// Mean across all indices.
    pub mean: f64,
}

impl Series {
    /// Build a series and compute its overall mean.
    #[must_use]
    pub fn new(label: impl Into<String>, variant: Option<AlgorithmVariant>, nanos: Vec<f64>) -> Self {
        let mean = stats::mean(&nanos);
        Self {
            label: label.into(),
            variant,
            nanos,
            mean,
        }
    }

    /// Element-wise `self - other`.
    #[must_use]
    pub fn difference(&self, other: &Series, label: impl Into<String>) -> Series {
        let nanos = self
            .nanos
            .iter()
            .zip(&other.nanos)
            .map(|(a, b)| a - b)
            .collect();
        Series::new(label, self.variant, nanos)
    }
}

/// Host the report was produced on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInfo {
    /// CPU brand string.
    pub cpu_model: String,
    /// Logical core count.
    pub num_cores: usize,
    /// Core the benchmark thread was pinned to, if any.
    pub pinned_cpu: Option<usize>,
    /// Unix timestamp (`unix:<secs>`).
    pub timestamp: String,
}

impl HostInfo {
    /// Describe the current host.
    #[must_use]
    pub fn current(pinned_cpu: Option<usize>) -> Self {
        Self {
            cpu_model: cpu_model(),
            num_cores: num_cpus(),
            pinned_cpu,
            timestamp: current_timestamp(),
        }
    }
}

/// Result of a perf run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfReport {
    /// Report format version.
    pub version: u32,
    /// What was measured.
    pub mode: PerfMode,
    /// Repetitions per index.
    pub runs: usize,
    /// Z-score cutoff used for outlier rejection.
    pub threshold: f64,
    /// Index of each column in the series.
    pub indices: Vec<u32>,
    /// Measured curves.
    pub series: Vec<Series>,
    /// Host description.
    pub host: HostInfo,
}

impl PerfReport {
    /// Whether this report can be read by the current version.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.version == REPORT_VERSION
    }

    /// Look up a series by label.
    #[must_use]
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Get the current CPU model string.
#[must_use]
pub fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().to_string())
        .unwrap_or_default()
}

/// Get the current unix timestamp.
#[must_use]
pub fn current_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("unix:{}", dur.as_secs())
}
