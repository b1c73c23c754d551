//! Benchmark error type.

use fibdev_core::DeviceError;

/// Errors from benchmark drivers and report persistence.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The device refused or aborted an operation.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Invalid benchmark configuration.
    #[error("invalid benchmark configuration: {0}")]
    Config(String),

    /// Report file could not be read or written.
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be (de)serialized.
    #[error("report format error: {0}")]
    Json(#[from] serde_json::Error),
}
