//! Side-channel control attributes (`fib_method`, `ktime_measure`).
//!
//! Both take a single ASCII digit on store and render `"<value>\n"` on
//! show. Only the first byte of a store is inspected; the whole payload is
//! reported as consumed.

use std::fmt;
use std::str::FromStr;

use crate::device::FibDevice;
use crate::error::DeviceError;

/// A named control attribute on a `FibDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAttribute {
    /// Active algorithm, `'0'..='3'`; larger digits clamp to `'3'`.
    FibMethod,
    /// Instrumentation flag; `'0'` disables, any other byte enables.
    KtimeMeasure,
}

impl ControlAttribute {
    /// Every attribute exposed by the device.
    pub const ALL: [ControlAttribute; 2] = [
        ControlAttribute::FibMethod,
        ControlAttribute::KtimeMeasure,
    ];

    /// Attribute name as exposed to callers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ControlAttribute::FibMethod => "fib_method",
            ControlAttribute::KtimeMeasure => "ktime_measure",
        }
    }

    /// Apply a write to this attribute. Returns the number of bytes consumed.
    pub fn store(self, device: &FibDevice, buf: &[u8]) -> Result<usize, DeviceError> {
        let &first = buf.first().ok_or(DeviceError::EmptyControl(self.name()))?;
        match self {
            ControlAttribute::FibMethod => {
                device.selector().select(u32::from(first.wrapping_sub(b'0')));
            }
            ControlAttribute::KtimeMeasure => {
                device.timing().set_enabled(first != b'0');
            }
        }
        Ok(buf.len())
    }

    /// Render the current value of this attribute.
    #[must_use]
    pub fn show(self, device: &FibDevice) -> String {
        match self {
            ControlAttribute::FibMethod => format!("{}\n", device.selector().current().index()),
            ControlAttribute::KtimeMeasure => format!("{}\n", u8::from(device.timing().enabled())),
        }
    }
}

impl fmt::Display for ControlAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fib_method" => Ok(ControlAttribute::FibMethod),
            "ktime_measure" => Ok(ControlAttribute::KtimeMeasure),
            other => Err(format!("unknown control attribute: {other}")),
        }
    }
}
