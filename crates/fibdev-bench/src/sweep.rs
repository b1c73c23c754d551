//! Device drivers: the smoke client and the two latency sweeps.
//!
//! Each driver configures the device through its control attributes, then
//! opens a session and walks the cursor. A sweep covers every index in
//! `0..=MAX_INDEX` after one warm-up read.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fibdev_core::{
    AlgorithmVariant, CancellationToken, ControlAttribute, DeviceError, FibDevice, Whence,
    MAX_INDEX,
};

/// Payload the smoke client writes; the device ignores it.
const CLIENT_PAYLOAD: &[u8] = b"testing writing";

/// One timed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    /// Fibonacci index read.
    pub index: u32,
    /// Elapsed nanoseconds.
    pub nanos: u64,
}

/// Everything the smoke client observed.
#[derive(Debug, Clone, Default)]
pub struct ClientLog {
    /// Return values of the `offset + 1` writes.
    pub writes: Vec<i64>,
    /// `(requested offset, value read)` walking up from 0.
    pub forward: Vec<(u32, i64)>,
    /// `(requested offset, value read)` walking back down to 0.
    pub backward: Vec<(u32, i64)>,
}

/// Select `variant` through the `fib_method` control.
pub fn select_variant(device: &FibDevice, variant: AlgorithmVariant) -> Result<(), DeviceError> {
    ControlAttribute::FibMethod.store(device, &[b'0' + variant.index()])?;
    Ok(())
}

/// Toggle instrumentation through the `ktime_measure` control.
pub fn set_ktime(device: &FibDevice, enabled: bool) -> Result<(), DeviceError> {
    let payload = if enabled { b"1" } else { b"0" };
    ControlAttribute::KtimeMeasure.store(device, payload)?;
    Ok(())
}

/// Exercise write and read across `0..=offset`, forward then backward.
///
/// Offsets past `MAX_INDEX` read F(`MAX_INDEX`).
pub fn client_run(
    device: &FibDevice,
    variant: AlgorithmVariant,
    offset: u32,
) -> Result<ClientLog, DeviceError> {
    let mut session = device.open()?;
    select_variant(device, variant)?;

    let mut log = ClientLog::default();
    for _ in 0..=offset {
        log.writes.push(session.write(CLIENT_PAYLOAD));
    }
    for i in 0..=offset {
        session.seek(i64::from(i), Whence::Set);
        log.forward.push((i, session.read()));
    }
    for i in (0..=offset).rev() {
        session.seek(i64::from(i), Whence::Set);
        log.backward.push((i, session.read()));
    }

    session.close();
    Ok(log)
}

/// Device-side latency: instrumentation on, read then `write` for the time.
pub fn ktime_sweep(
    device: &FibDevice,
    variant: AlgorithmVariant,
    cancel: &CancellationToken,
) -> Result<Vec<LatencySample>, DeviceError> {
    let mut session = device.open()?;
    set_ktime(device, true)?;
    select_variant(device, variant)?;

    black_box(session.read());

    let mut samples = Vec::with_capacity(MAX_INDEX as usize + 1);
    for i in 0..=MAX_INDEX {
        cancel.check_cancelled()?;
        session.seek(i64::from(i), Whence::Set);
        black_box(session.read());
        let nanos = u64::try_from(session.write(&[])).unwrap_or(0);
        samples.push(LatencySample { index: i, nanos });
    }

    debug!(variant = variant.name(), "ktime sweep complete");
    Ok(samples)
}

/// Caller-side latency: instrumentation off, monotonic clock around `read`.
#[allow(clippy::cast_possible_truncation)]
pub fn utime_sweep(
    device: &FibDevice,
    variant: AlgorithmVariant,
    cancel: &CancellationToken,
) -> Result<Vec<LatencySample>, DeviceError> {
    let mut session = device.open()?;
    set_ktime(device, false)?;
    select_variant(device, variant)?;

    // Touch the clock and the read path once before measuring.
    let start = Instant::now();
    black_box(session.read());
    black_box(start.elapsed());

    let mut samples = Vec::with_capacity(MAX_INDEX as usize + 1);
    for i in 0..=MAX_INDEX {
        cancel.check_cancelled()?;
        session.seek(i64::from(i), Whence::Set);
        let start = Instant::now();
        black_box(session.read());
        let nanos = start.elapsed().as_nanos() as u64;
        samples.push(LatencySample { index: i, nanos });
    }

    debug!(variant = variant.name(), "utime sweep complete");
    Ok(samples)
}
