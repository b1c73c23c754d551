//! Algorithm variants selectable through the `fib_method` control.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bitwidth::BitScan;
use crate::constants::VARIANT_COUNT;
use crate::error::DeviceError;

/// Closed set of Fibonacci strategies. Discriminants match the control digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum AlgorithmVariant {
    /// Bottom-up table, O(k).
    #[default]
    Iterative = 0,
    /// Fast doubling, bit width found by shifting.
    FastDoublingLinearScan = 1,
    /// Fast doubling, bit width found by "find last set".
    FastDoublingFindLastSet = 2,
    /// Fast doubling, bit width found by counting leading zeros.
    FastDoublingCountLeadingZeros = 3,
}

impl AlgorithmVariant {
    /// Every variant, ordered by control digit.
    pub const ALL: [AlgorithmVariant; VARIANT_COUNT] = [
        AlgorithmVariant::Iterative,
        AlgorithmVariant::FastDoublingLinearScan,
        AlgorithmVariant::FastDoublingFindLastSet,
        AlgorithmVariant::FastDoublingCountLeadingZeros,
    ];

    /// The fast-doubling variants only.
    pub const FAST_DOUBLING: [AlgorithmVariant; 3] = [
        AlgorithmVariant::FastDoublingLinearScan,
        AlgorithmVariant::FastDoublingFindLastSet,
        AlgorithmVariant::FastDoublingCountLeadingZeros,
    ];

    /// Map any index onto a variant, clamping to the last one.
    #[must_use]
    pub fn from_index_clamped(requested: u32) -> Self {
        let idx = (requested as usize).min(VARIANT_COUNT - 1);
        Self::ALL[idx]
    }

    /// Control digit for this variant.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Bit-scan technique, or `None` for the iterative variant.
    #[must_use]
    pub fn bit_scan(self) -> Option<BitScan> {
        match self {
            AlgorithmVariant::Iterative => None,
            AlgorithmVariant::FastDoublingLinearScan => Some(BitScan::LinearScan),
            AlgorithmVariant::FastDoublingFindLastSet => Some(BitScan::FindLastSet),
            AlgorithmVariant::FastDoublingCountLeadingZeros => Some(BitScan::CountLeadingZeros),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmVariant::Iterative => "Iterative",
            AlgorithmVariant::FastDoublingLinearScan => "FastDoubling",
            AlgorithmVariant::FastDoublingFindLastSet => "FastDoublingFls",
            AlgorithmVariant::FastDoublingCountLeadingZeros => "FastDoublingClz",
        }
    }
}

impl fmt::Display for AlgorithmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmVariant {
    type Err = DeviceError;

    /// Accepts a numeric index (clamped) or a short name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Ok(Self::from_index_clamped(n));
        }
        match s.to_ascii_lowercase().as_str() {
            "iterative" | "sequence" | "seq" => Ok(AlgorithmVariant::Iterative),
            "fast" | "fastdoubling" | "linear" => Ok(AlgorithmVariant::FastDoublingLinearScan),
            "fls" | "fastdoublingfls" => Ok(AlgorithmVariant::FastDoublingFindLastSet),
            "clz" | "fastdoublingclz" => Ok(AlgorithmVariant::FastDoublingCountLeadingZeros),
            _ => Err(DeviceError::UnknownVariant(s.to_string())),
        }
    }
}
