//! Cursor session: the file-like view of a `FibDevice`.
//!
//! A session exists only while open; `close` consumes it and dropping it
//! has the same effect, so operations on a closed session cannot be
//! expressed.

use std::fmt;

use tracing::debug;

use crate::constants::{MAX_INDEX, WRITE_SENTINEL};
use crate::device::FibDevice;

/// Seek origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Whence {
    /// Absolute position.
    Set,
    /// Relative to the current cursor.
    Cur,
    /// Counted back from `MAX_INDEX`.
    End,
}

/// Exclusive handle on a device, holding the index cursor.
pub struct CursorSession<'a> {
    device: &'a FibDevice,
    cursor: u32,
}

impl<'a> CursorSession<'a> {
    pub(crate) fn new(device: &'a FibDevice) -> Self {
        Self { device, cursor: 0 }
    }

    /// Current cursor, always in `0..=MAX_INDEX`.
    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Move the cursor and return the new position.
    ///
    /// Targets outside `0..=MAX_INDEX` clamp to the nearest bound.
    ///
    /// # Example
    /// ```
    /// use fibdev_core::{FibDevice, Whence};
    ///
    /// let device = FibDevice::new();
    /// let mut session = device.open().unwrap();
    /// assert_eq!(session.seek(-5, Whence::Set), 0);
    /// assert_eq!(session.seek(1000, Whence::Set), 92);
    /// assert_eq!(session.seek(2, Whence::End), 90);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn seek(&mut self, offset: i64, whence: Whence) -> u32 {
        let max = i64::from(MAX_INDEX);
        let target = match whence {
            Whence::Set => offset,
            Whence::Cur => i64::from(self.cursor).saturating_add(offset),
            Whence::End => max.saturating_sub(offset),
        };
        self.cursor = target.clamp(0, max) as u32;
        debug!(offset, ?whence, cursor = self.cursor, "seek");
        self.cursor
    }

    /// F(cursor) computed with the device's active variant.
    ///
    /// The cursor does not move.
    pub fn read(&self) -> i64 {
        let variant = self.device.selector().current();
        self.device.timing().measured_call(self.cursor, variant)
    }

    /// Ignores `payload`. Returns the last measured latency in nanoseconds
    /// when instrumentation is enabled, otherwise `1`.
    pub fn write(&mut self, _payload: &[u8]) -> i64 {
        let timing = self.device.timing();
        if timing.enabled() {
            i64::try_from(timing.last_elapsed_nanoseconds()).unwrap_or(i64::MAX)
        } else {
            WRITE_SENTINEL
        }
    }

    /// Release the device.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for CursorSession<'_> {
    fn drop(&mut self) {
        self.device.release();
    }
}

impl fmt::Debug for CursorSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorSession")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIB_TABLE;
    use crate::control::ControlAttribute;
    use crate::variant::AlgorithmVariant;

    #[test]
    fn starts_at_zero() {
        let device = FibDevice::new();
        let session = device.open().unwrap();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.read(), 0);
    }

    #[test]
    fn seek_set_clamps() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.seek(-5, Whence::Set), 0);
        assert_eq!(session.seek(1000, Whence::Set), 92);
        assert_eq!(session.seek(42, Whence::Set), 42);
    }

    #[test]
    fn seek_end() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.seek(0, Whence::End), 92);
        assert_eq!(session.seek(10, Whence::End), 82);
        assert_eq!(session.seek(-10, Whence::End), 92);
        assert_eq!(session.seek(500, Whence::End), 0);
    }

    #[test]
    fn seek_cur() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(10, Whence::Set);
        assert_eq!(session.seek(5, Whence::Cur), 15);
        assert_eq!(session.seek(-20, Whence::Cur), 0);
        assert_eq!(session.seek(200, Whence::Cur), 92);
    }

    #[test]
    fn seek_extremes_do_not_overflow() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(50, Whence::Set);
        assert_eq!(session.seek(i64::MAX, Whence::Cur), 92);
        assert_eq!(session.seek(i64::MIN, Whence::Cur), 0);
        assert_eq!(session.seek(i64::MIN, Whence::End), 92);
        assert_eq!(session.seek(i64::MAX, Whence::End), 0);
    }

    #[test]
    fn read_is_idempotent() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(30, Whence::Set);
        let first = session.read();
        let second = session.read();
        assert_eq!(first, FIB_TABLE[30]);
        assert_eq!(first, second);
        assert_eq!(session.cursor(), 30);
    }

    #[test]
    fn read_follows_active_variant() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(92, Whence::Set);
        for variant in AlgorithmVariant::ALL {
            device.selector().set(variant);
            assert_eq!(session.read(), FIB_TABLE[92], "{variant}");
        }
    }

    #[test]
    fn write_returns_sentinel_when_disabled() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(50, Whence::Set);
        session.read();
        assert_eq!(session.write(b"testing writing"), 1);
        assert_eq!(session.write(&[]), 1);
    }

    #[test]
    fn write_returns_latency_when_enabled() {
        let device = FibDevice::with_config(AlgorithmVariant::Iterative, true);
        let mut session = device.open().unwrap();
        session.seek(92, Whence::Set);
        session.read();
        let ns = session.write(&[]);
        assert!(ns >= 0);
        assert_eq!(u64::try_from(ns).unwrap(), device.timing().last_elapsed_nanoseconds());
    }

    #[test]
    fn write_is_sentinel_after_timed_reads_once_disabled() {
        let device = FibDevice::with_config(AlgorithmVariant::Iterative, true);
        let mut session = device.open().unwrap();
        session.seek(92, Whence::Set);
        session.read();
        ControlAttribute::KtimeMeasure.store(&device, b"0").unwrap();
        assert_eq!(session.write(&[]), 1);
        session.read();
        assert_eq!(session.write(b"anything"), 1);
    }

    #[test]
    fn reenabling_exposes_stale_measurement_until_next_read() {
        let device = FibDevice::with_config(AlgorithmVariant::Iterative, true);
        let mut session = device.open().unwrap();
        session.seek(92, Whence::Set);
        session.read();
        let timed = device.timing().last_elapsed_nanoseconds();

        ControlAttribute::KtimeMeasure.store(&device, b"0").unwrap();
        session.seek(3, Whence::Set);
        session.read();
        assert_eq!(session.write(&[]), 1);

        ControlAttribute::KtimeMeasure.store(&device, b"1").unwrap();
        assert_eq!(u64::try_from(session.write(&[])).unwrap(), timed);

        session.read();
        let fresh = device.timing().last_elapsed_nanoseconds();
        assert_eq!(u64::try_from(session.write(&[])).unwrap(), fresh);
    }

    #[test]
    fn select_seek_read_toggle_write_reopen() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();

        ControlAttribute::FibMethod.store(&device, b"2").unwrap();
        assert_eq!(session.seek(10, Whence::Set), 10);
        assert_eq!(session.read(), 55);

        ControlAttribute::KtimeMeasure.store(&device, b"1").unwrap();
        assert_eq!(session.read(), 55);
        assert!(session.write(&[]) >= 0);

        session.close();
        let reopened = device.open().unwrap();
        assert_eq!(reopened.cursor(), 0);
        assert_eq!(
            device.selector().current(),
            AlgorithmVariant::FastDoublingFindLastSet
        );
    }

    #[test]
    fn end_seeks_count_back_in_a_sequence() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        assert_eq!(session.seek(10, Whence::End), 82);
        assert_eq!(session.read(), FIB_TABLE[82]);
        assert_eq!(session.seek(-2, Whence::Cur), 80);
        assert_eq!(session.seek(-3, Whence::End), 92);
        assert_eq!(session.seek(92, Whence::End), 0);
        assert_eq!(session.read(), 0);
    }

    #[test]
    fn debug_shows_cursor() {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(7, Whence::Set);
        assert!(format!("{session:?}").contains("cursor: 7"));
    }
}
