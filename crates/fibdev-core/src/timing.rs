//! Optional latency capture around engine calls.

use std::hint::black_box;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::info;

use crate::engine;
use crate::variant::AlgorithmVariant;

#[derive(Debug, Default, Clone, Copy)]
struct TimingState {
    enabled: bool,
    last_ns: u64,
}

/// Wraps `engine::compute`, recording the monotonic elapsed time of the
/// last call while enabled.
///
/// The last measurement survives disabling; re-enabling exposes the stale
/// value until the next measured call.
pub struct TimingInstrument {
    state: Mutex<TimingState>,
}

impl TimingInstrument {
    /// Create a disabled instrument with no measurement recorded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TimingState::default()),
        }
    }

    /// Whether reads are currently timed.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.state.lock().enabled
    }

    /// Turn timing on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
        info!("ktime measure: {}", u8::from(enabled));
    }

    /// Compute F(k), timing the call when enabled.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measured_call(&self, k: u32, variant: AlgorithmVariant) -> i64 {
        if !self.enabled() {
            return engine::compute(k, variant);
        }

        let start = Instant::now();
        let result = black_box(engine::compute(black_box(k), variant));
        let elapsed = start.elapsed();

        self.state.lock().last_ns = elapsed.as_nanos() as u64;
        result
    }

    /// Most recent measurement in nanoseconds; 0 before the first one.
    #[must_use]
    pub fn last_elapsed_nanoseconds(&self) -> u64 {
        self.state.lock().last_ns
    }
}

impl Default for TimingInstrument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled_and_zero() {
        let timing = TimingInstrument::new();
        assert!(!timing.enabled());
        assert_eq!(timing.last_elapsed_nanoseconds(), 0);
    }

    #[test]
    fn disabled_call_does_not_record() {
        let timing = TimingInstrument::new();
        assert_eq!(timing.measured_call(20, AlgorithmVariant::Iterative), 6765);
        assert_eq!(timing.last_elapsed_nanoseconds(), 0);
    }

    #[test]
    fn enabled_call_returns_value() {
        let timing = TimingInstrument::new();
        timing.set_enabled(true);
        let value = timing.measured_call(92, AlgorithmVariant::Iterative);
        assert_eq!(value, 7_540_113_804_746_346_429);
    }

    #[test]
    fn measurement_survives_disable() {
        let timing = TimingInstrument::new();
        timing.set_enabled(true);
        // Repeat until the clock resolves a non-zero interval.
        let mut last = 0;
        for _ in 0..1000 {
            timing.measured_call(92, AlgorithmVariant::Iterative);
            last = timing.last_elapsed_nanoseconds();
            if last > 0 {
                break;
            }
        }
        timing.set_enabled(false);
        timing.measured_call(10, AlgorithmVariant::Iterative);
        assert_eq!(timing.last_elapsed_nanoseconds(), last);
    }

    #[test]
    fn toggle_round_trip() {
        let timing = TimingInstrument::default();
        timing.set_enabled(true);
        assert!(timing.enabled());
        timing.set_enabled(false);
        assert!(!timing.enabled());
    }
}
