//! fibdev library: application logic for the `fibdev` binary.

pub mod app;
pub mod config;
pub mod errors;
