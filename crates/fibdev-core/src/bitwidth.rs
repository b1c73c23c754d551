//! Highest-set-bit position of an unsigned integer.
//!
//! All three techniques return the one-indexed position `h` of the most
//! significant set bit, so that `1 << (h - 1)` is the top bit of `n`:
//!
//! ```text
//! n = 50 = 0b0011_0010  ->  h = 6
//!            ^ 6th bit from the right
//! ```
//!
//! The result is undefined for `n == 0`; callers special-case zero before
//! asking for a width.

use serde::{Deserialize, Serialize};

/// Technique used to locate the most significant set bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitScan {
    /// Shift right until the value is exhausted, counting steps.
    LinearScan,
    /// Built-in "find last set" (`ilog2 + 1`).
    FindLastSet,
    /// `31 - leading_zeros`, converted to a one-indexed position.
    CountLeadingZeros,
}

impl BitScan {
    /// Every technique, in declaration order.
    pub const ALL: [BitScan; 3] = [
        BitScan::LinearScan,
        BitScan::FindLastSet,
        BitScan::CountLeadingZeros,
    ];

    /// One-indexed position of the highest set bit of `n`.
    #[inline]
    #[must_use]
    pub fn highest_set_bit_position(self, n: u32) -> u32 {
        debug_assert!(n > 0, "bit width of zero is undefined");
        match self {
            BitScan::LinearScan => linear_scan(n),
            BitScan::FindLastSet => find_last_set(n),
            BitScan::CountLeadingZeros => count_leading_zeros(n),
        }
    }

    /// Short name used in reports and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BitScan::LinearScan => "linear",
            BitScan::FindLastSet => "fls",
            BitScan::CountLeadingZeros => "clz",
        }
    }
}

#[inline]
fn linear_scan(n: u32) -> u32 {
    let mut h = 0;
    let mut i = n;
    while i != 0 {
        h += 1;
        i >>= 1;
    }
    h
}

#[inline]
fn find_last_set(n: u32) -> u32 {
    n.ilog2() + 1
}

#[inline]
fn count_leading_zeros(n: u32) -> u32 {
    // 31 - clz is the zero-indexed bit number.
    (31 - n.leading_zeros()) + 1
}
