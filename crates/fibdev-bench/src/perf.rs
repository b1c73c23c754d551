//! Repeated latency sweeps aggregated into a `PerfReport`.

use tracing::{info, warn};

use fibdev_core::{AlgorithmVariant, CancellationToken, FibDevice, MAX_INDEX};

use crate::error::BenchError;
use crate::report::{HostInfo, PerfMode, PerfReport, Series, REPORT_VERSION};
use crate::stats::{self, DEFAULT_Z_THRESHOLD};
use crate::sweep::{ktime_sweep, utime_sweep, LatencySample};

/// Default number of repetitions per perf run.
pub const DEFAULT_RUNS: usize = 50;

/// Settings for [`perf_run`].
#[derive(Debug, Clone)]
pub struct PerfConfig {
    /// Variant measured in `UserVsDevice` mode.
    pub variant: AlgorithmVariant,
    /// Number of sweeps per series.
    pub runs: usize,
    /// Z-score cutoff for outlier rejection.
    pub threshold: f64,
    /// What to measure.
    pub mode: PerfMode,
    /// Core to pin the sweeps to. They then run on a dedicated thread.
    pub cpu: Option<usize>,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            variant: AlgorithmVariant::Iterative,
            runs: DEFAULT_RUNS,
            threshold: DEFAULT_Z_THRESHOLD,
            mode: PerfMode::UserVsDevice,
            cpu: None,
        }
    }
}

impl PerfConfig {
    /// Reject settings that cannot produce a report.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.runs == 0 {
            return Err(BenchError::Config("runs must be at least 1".into()));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(BenchError::Config(format!(
                "outlier threshold must be positive, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Number of sweeps a run will perform in total.
    #[must_use]
    pub fn total_sweeps(&self) -> usize {
        match self.mode {
            PerfMode::UserVsDevice => self.runs * 2,
            PerfMode::Compare => self.runs * AlgorithmVariant::FAST_DOUBLING.len(),
        }
    }
}

/// Receives a tick after every completed sweep, possibly from a worker
/// thread.
pub trait RunObserver: Sync {
    /// `done` sweeps out of `total` have finished.
    fn on_sweep(&self, done: usize, total: usize);
}

/// Observer that ignores progress.
pub struct NoOpRunObserver;

impl RunObserver for NoOpRunObserver {
    fn on_sweep(&self, _done: usize, _total: usize) {}
}

/// Pin the current thread to `cpu`. Returns whether pinning succeeded.
pub fn pin_to_cpu(cpu: usize) -> bool {
    let Some(core) = core_affinity::get_core_ids()
        .unwrap_or_default()
        .into_iter()
        .find(|c| c.id == cpu)
    else {
        warn!(cpu, "no such core, running unpinned");
        return false;
    };
    let pinned = core_affinity::set_for_current(core);
    if !pinned {
        warn!(cpu, "failed to pin benchmark thread");
    }
    pinned
}

/// Run the configured sweeps and aggregate them into a report.
///
/// With `cpu` set, the sweeps run on a scoped worker thread pinned to that
/// core; the calling thread's affinity is left untouched.
pub fn perf_run(
    device: &FibDevice,
    config: &PerfConfig,
    cancel: &CancellationToken,
    observer: &dyn RunObserver,
) -> Result<PerfReport, BenchError> {
    config.validate()?;

    let Some(cpu) = config.cpu else {
        return run_sweeps(device, config, cancel, observer, None);
    };
    std::thread::scope(|s| {
        s.spawn(|| {
            let pinned = pin_to_cpu(cpu).then_some(cpu);
            run_sweeps(device, config, cancel, observer, pinned)
        })
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

fn run_sweeps(
    device: &FibDevice,
    config: &PerfConfig,
    cancel: &CancellationToken,
    observer: &dyn RunObserver,
    pinned_cpu: Option<usize>,
) -> Result<PerfReport, BenchError> {
    let total = config.total_sweeps();
    let mut done = 0;
    let mut tick = || {
        done += 1;
        observer.on_sweep(done, total);
    };

    let series = match config.mode {
        PerfMode::UserVsDevice => {
            let mut user_runs = Vec::with_capacity(config.runs);
            let mut device_runs = Vec::with_capacity(config.runs);
            for _ in 0..config.runs {
                user_runs.push(nanos(&utime_sweep(device, config.variant, cancel)?));
                tick();
                device_runs.push(nanos(&ktime_sweep(device, config.variant, cancel)?));
                tick();
            }
            let variant = Some(config.variant);
            let user = Series::new(
                "user",
                variant,
                stats::aggregate_runs(&user_runs, config.threshold),
            );
            let kernel = Series::new(
                "device",
                variant,
                stats::aggregate_runs(&device_runs, config.threshold),
            );
            let overhead = user.difference(&kernel, "overhead");
            vec![user, kernel, overhead]
        }
        PerfMode::Compare => {
            let mut out = Vec::with_capacity(AlgorithmVariant::FAST_DOUBLING.len());
            for variant in AlgorithmVariant::FAST_DOUBLING {
                let mut runs = Vec::with_capacity(config.runs);
                for _ in 0..config.runs {
                    runs.push(nanos(&ktime_sweep(device, variant, cancel)?));
                    tick();
                }
                out.push(Series::new(
                    variant.name(),
                    Some(variant),
                    stats::aggregate_runs(&runs, config.threshold),
                ));
            }
            out
        }
    };

    for s in &series {
        info!(label = %s.label, mean_ns = s.mean, "series aggregated");
    }

    Ok(PerfReport {
        version: REPORT_VERSION,
        mode: config.mode,
        runs: config.runs,
        threshold: config.threshold,
        indices: (0..=MAX_INDEX).collect(),
        series,
        host: HostInfo::current(pinned_cpu),
    })
}

fn nanos(samples: &[LatencySample]) -> Vec<u64> {
    samples.iter().map(|s| s.nanos).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    use super::*;
    use fibdev_core::DeviceError;

    struct Counting(AtomicUsize);

    impl RunObserver for Counting {
        fn on_sweep(&self, done: usize, _total: usize) {
            self.0.store(done, Ordering::Relaxed);
        }
    }

    #[derive(Default)]
    struct ThreadRecorder(Mutex<Vec<ThreadId>>);

    impl RunObserver for ThreadRecorder {
        fn on_sweep(&self, _done: usize, _total: usize) {
            self.0.lock().unwrap().push(thread::current().id());
        }
    }

    #[test]
    fn user_vs_device_series() {
        let device = FibDevice::new();
        let config = PerfConfig {
            runs: 2,
            ..PerfConfig::default()
        };
        let observer = Counting(AtomicUsize::new(0));
        let report = perf_run(&device, &config, &CancellationToken::new(), &observer).unwrap();
        assert_eq!(report.mode, PerfMode::UserVsDevice);
        assert_eq!(report.indices.len(), 93);
        assert_eq!(report.series.len(), 3);
        assert!(report.series("user").is_some());
        assert!(report.series("device").is_some());
        assert_eq!(report.series("overhead").unwrap().nanos.len(), 93);
        assert_eq!(observer.0.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn compare_series() {
        let device = FibDevice::new();
        let config = PerfConfig {
            runs: 1,
            mode: PerfMode::Compare,
            ..PerfConfig::default()
        };
        let report =
            perf_run(&device, &config, &CancellationToken::new(), &NoOpRunObserver).unwrap();
        let labels: Vec<&str> = report.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["FastDoubling", "FastDoublingFls", "FastDoublingClz"]);
    }

    #[test]
    fn zero_runs_rejected() {
        let config = PerfConfig {
            runs: 0,
            ..PerfConfig::default()
        };
        assert!(matches!(config.validate(), Err(BenchError::Config(_))));
    }

    #[test]
    fn bad_threshold_rejected() {
        let config = PerfConfig {
            threshold: 0.0,
            ..PerfConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn total_sweeps_by_mode() {
        let mut config = PerfConfig {
            runs: 5,
            ..PerfConfig::default()
        };
        assert_eq!(config.total_sweeps(), 10);
        config.mode = PerfMode::Compare;
        assert_eq!(config.total_sweeps(), 15);
    }

    #[test]
    fn busy_device_fails() {
        let device = FibDevice::new();
        let _held = device.open().unwrap();
        let config = PerfConfig {
            runs: 1,
            ..PerfConfig::default()
        };
        let err = perf_run(&device, &config, &CancellationToken::new(), &NoOpRunObserver)
            .unwrap_err();
        assert!(matches!(err, BenchError::Device(DeviceError::Busy)));
    }

    #[test]
    fn pinned_run_leaves_caller_thread_alone() {
        let device = FibDevice::new();
        let config = PerfConfig {
            runs: 1,
            cpu: Some(0),
            ..PerfConfig::default()
        };
        let recorder = ThreadRecorder::default();
        let report = perf_run(&device, &config, &CancellationToken::new(), &recorder).unwrap();
        assert_eq!(report.series.len(), 3);
        assert!(report.host.pinned_cpu.is_none() || report.host.pinned_cpu == Some(0));

        let caller = thread::current().id();
        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|&id| id != caller));
    }

    #[test]
    fn unpinned_run_stays_on_caller_thread() {
        let device = FibDevice::new();
        let config = PerfConfig {
            runs: 1,
            ..PerfConfig::default()
        };
        let recorder = ThreadRecorder::default();
        let report = perf_run(&device, &config, &CancellationToken::new(), &recorder).unwrap();
        assert_eq!(report.host.pinned_cpu, None);
        let caller = thread::current().id();
        assert!(recorder.0.lock().unwrap().iter().all(|&id| id == caller));
    }

    #[test]
    fn pin_to_missing_core() {
        assert!(!pin_to_cpu(usize::MAX));
    }
}
