//! Error type for device operations.

use crate::variant::AlgorithmVariant;

/// Errors surfaced by the device and its controls.
///
/// Index and selector inputs clamp instead of failing, so the computation
/// path itself never produces an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Another session currently holds the device.
    #[error("device busy: another session is open")]
    Busy,

    /// A control attribute was written with an empty payload.
    #[error("empty write to control `{0}`")]
    EmptyControl(&'static str),

    /// A variant name was not recognised.
    #[error("unknown algorithm variant: {0}")]
    UnknownVariant(String),

    /// The run was cancelled.
    #[error("run cancelled")]
    Cancelled,

    /// Two variants disagreed on a value.
    #[error("variant mismatch at F({index}): {reference} = {expected}, {variant} = {actual}")]
    Mismatch {
        index: u32,
        reference: AlgorithmVariant,
        variant: AlgorithmVariant,
        expected: i64,
        actual: i64,
    },
}

impl DeviceError {
    /// Whether the caller may retry the same operation later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, DeviceError::Busy)
    }
}
