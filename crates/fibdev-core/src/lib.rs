//! # fibdev-core
//!
//! Fibonacci numbers behind a single-session, cursor-addressed device.
//! The cursor selects the index, a control selects one of four algorithm
//! variants, and another control toggles per-read latency capture.

pub mod bitwidth;
pub mod constants;
pub mod control;
pub mod device;
pub mod engine;
pub mod error;
pub mod progress;
pub mod selector;
pub mod session;
pub mod timing;
pub mod variant;

// Re-exports
pub use bitwidth::BitScan;
pub use constants::{exit_codes, FIB_TABLE, MAX_INDEX, VARIANT_COUNT};
pub use control::ControlAttribute;
pub use device::FibDevice;
pub use error::DeviceError;
pub use progress::CancellationToken;
pub use selector::AlgorithmSelector;
pub use session::{CursorSession, Whence};
pub use timing::TimingInstrument;
pub use variant::AlgorithmVariant;

