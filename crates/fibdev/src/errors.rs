//! Error handling and exit codes.

use fibdev_bench::BenchError;
use fibdev_core::{exit_codes, DeviceError};

/// Exit code for a device error.
pub fn handle_error(err: &DeviceError) -> i32 {
    match err {
        DeviceError::Busy => exit_codes::ERROR_BUSY,
        DeviceError::EmptyControl(_) | DeviceError::UnknownVariant(_) => exit_codes::ERROR_CONFIG,
        DeviceError::Cancelled => exit_codes::ERROR_CANCELED,
        DeviceError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for a benchmark error.
pub fn handle_bench_error(err: &BenchError) -> i32 {
    match err {
        BenchError::Device(e) => handle_error(e),
        BenchError::Config(_) => exit_codes::ERROR_CONFIG,
        BenchError::Io(_) | BenchError::Json(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<DeviceError>() {
        handle_error(e)
    } else if let Some(e) = err.downcast_ref::<BenchError>() {
        handle_bench_error(e)
    } else {
        exit_codes::ERROR_GENERIC
    }
}
