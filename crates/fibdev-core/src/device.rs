//! The Fibonacci device: configuration plus the exclusive session lock.
//!
//! Each `FibDevice` is independent. Algorithm selection and instrumentation
//! belong to the device and can change at any time, including while a
//! session is open; only `open` is serialized.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::error::DeviceError;
use crate::selector::AlgorithmSelector;
use crate::session::CursorSession;
use crate::timing::TimingInstrument;
use crate::variant::AlgorithmVariant;

/// Device-wide state shared by every session opened on it.
pub struct FibDevice {
    selector: AlgorithmSelector,
    timing: TimingInstrument,
    in_use: AtomicBool,
}

impl FibDevice {
    /// Create a device with the iterative variant and timing disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AlgorithmVariant::default(), false)
    }

    /// Create a device with an initial variant and instrumentation flag.
    #[must_use]
    pub fn with_config(variant: AlgorithmVariant, ktime: bool) -> Self {
        let timing = TimingInstrument::new();
        if ktime {
            timing.set_enabled(true);
        }
        Self {
            selector: AlgorithmSelector::with_variant(variant),
            timing,
            in_use: AtomicBool::new(false),
        }
    }

    /// Open a session. Never waits: fails with `Busy` if one is already open.
    pub fn open(&self) -> Result<CursorSession<'_>, DeviceError> {
        if self
            .in_use
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("fibdev is in use");
            return Err(DeviceError::Busy);
        }
        debug!("session opened");
        Ok(CursorSession::new(self))
    }

    /// Whether a session currently holds the device.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_use.load(Ordering::Acquire)
    }

    /// Algorithm selection control.
    #[must_use]
    pub fn selector(&self) -> &AlgorithmSelector {
        &self.selector
    }

    /// Instrumentation control.
    #[must_use]
    pub fn timing(&self) -> &TimingInstrument {
        &self.timing
    }

    pub(crate) fn release(&self) {
        self.in_use.store(false, Ordering::Release);
        debug!("session released");
    }
}

impl Default for FibDevice {
    fn default() -> Self {
        Self::new()
    }
}
