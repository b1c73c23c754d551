#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdev_core::bitwidth::BitScan;
use fibdev_core::engine::compute;
use fibdev_core::{AlgorithmVariant, FIB_TABLE, MAX_INDEX};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let raw = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    // Every bit-scan technique reports the same width for any nonzero input.
    if raw != 0 {
        let widths: Vec<u32> = BitScan::ALL
            .iter()
            .map(|scan| scan.highest_set_bit_position(raw))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "widths {widths:?} for {raw}");
        assert_eq!(widths[0], 32 - raw.leading_zeros());
    }

    let k = raw % (MAX_INDEX + 1);
    let expected = FIB_TABLE[k as usize];
    for variant in AlgorithmVariant::ALL {
        assert_eq!(compute(k, variant), expected, "{variant} at k={k}");
    }
});
