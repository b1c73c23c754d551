//! Fibonacci engine: one linear pass and three fast-doubling variants.
//!
//! Fast doubling uses the identities:
//!   F(2m)   = F(m) * (2*F(m+1) - F(m))
//!   F(2m+1) = F(m)^2 + F(m+1)^2
//!
//! and walks the bits of `k` from MSB to LSB. Products are formed in `u64`
//! with wrapping arithmetic; every value that survives a step is at most
//! F(93), which fits in `u64`, and the returned F(k) fits in `i64` for
//! `k <= MAX_INDEX`.

use crate::bitwidth::BitScan;
use crate::constants::{MAX_INDEX, SEQUENCE_CAPACITY};
use crate::variant::AlgorithmVariant;

/// Compute F(k) with the given variant.
///
/// `k` must already be clamped to `0..=MAX_INDEX`; larger values are a
/// caller bug.
///
/// # Example
/// ```
/// use fibdev_core::engine::compute;
/// use fibdev_core::AlgorithmVariant;
///
/// assert_eq!(compute(10, AlgorithmVariant::Iterative), 55);
/// assert_eq!(compute(10, AlgorithmVariant::FastDoublingFindLastSet), 55);
/// ```
#[inline]
#[must_use]
pub fn compute(k: u32, variant: AlgorithmVariant) -> i64 {
    debug_assert!(k <= MAX_INDEX, "index {k} outside 0..={MAX_INDEX}");
    match variant.bit_scan() {
        None => fib_sequence(k),
        Some(scan) => fib_fast_doubling(k, scan),
    }
}

/// Bottom-up table in a fixed buffer sized for the whole index domain.
#[must_use]
pub fn fib_sequence(k: u32) -> i64 {
    let k = k as usize;
    let mut f = [0i64; SEQUENCE_CAPACITY];
    f[1] = 1;
    for i in 2..=k {
        f[i] = f[i - 1] + f[i - 2];
    }
    f[k]
}

/// Fast doubling, with the loop length taken from `scan`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn fib_fast_doubling(k: u32, scan: BitScan) -> i64 {
    if k == 0 {
        return 0;
    }

    let h = scan.highest_set_bit_position(k);

    // a = F(m), b = F(m+1) where m is the prefix of k consumed so far.
    let mut a: u64 = 0;
    let mut b: u64 = 1;
    let mut mask = 1u32 << (h - 1);
    while mask != 0 {
        let c = a.wrapping_mul(b.wrapping_mul(2).wrapping_sub(a));
        let d = a.wrapping_mul(a).wrapping_add(b.wrapping_mul(b));

        if mask & k != 0 {
            a = d;
            b = c.wrapping_add(d);
        } else {
            a = c;
            b = d;
        }
        mask >>= 1;
    }

    a as i64
}
