//! Index domain bounds and process exit codes.

/// Largest Fibonacci index served by the device.
///
/// F(92) = 7,540,113,804,746,346,429 is the largest Fibonacci number that
/// fits in `i64`. F(93) = 12,200,160,415,121,876,738 overflows `i64::MAX`
/// (9,223,372,036,854,775,807).
pub const MAX_INDEX: u32 = 92;

/// Number of selectable algorithm variants.
pub const VARIANT_COUNT: usize = 4;

/// Capacity of the bottom-up table used by the iterative variant.
pub const SEQUENCE_CAPACITY: usize = MAX_INDEX as usize + 2;

/// Value returned by `write` while instrumentation is disabled.
pub const WRITE_SENTINEL: i64 = 1;

/// Precomputed Fibonacci values for k = 0..=92, used as a reference.
pub const FIB_TABLE: [i64; MAX_INDEX as usize + 1] = {
    let mut table = [0i64; MAX_INDEX as usize + 1];
    table[1] = 1;
    let mut i = 2;
    while i <= MAX_INDEX as usize {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};

/// Process exit codes for the `fibdev` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Variant results did not match during verification.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Device already held by another session (EBUSY).
    pub const ERROR_BUSY: i32 = 16;
    /// Run cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
