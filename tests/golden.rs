//! Golden file integration tests.
//!
//! Reads tests/testdata/fibonacci_golden.json and verifies every variant,
//! both directly and through a device session, against the known values and
//! an independent big-integer recurrence.

use num_bigint::BigUint;
use serde::Deserialize;

use fibdev_bench::{client_run, verify_all_variants};
use fibdev_core::engine::compute;
use fibdev_core::{
    AlgorithmVariant, CancellationToken, ControlAttribute, FibDevice, Whence, FIB_TABLE, MAX_INDEX,
};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    max_index: u32,
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    k: u32,
    fib: String,
}

impl GoldenEntry {
    fn expected(&self) -> i64 {
        self.fib.parse().expect("golden value fits in i64")
    }
}

fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/fibonacci_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

/// F(0..=n) by the textbook recurrence on big integers.
fn bigint_reference(n: u32) -> Vec<BigUint> {
    let mut seq = vec![BigUint::from(0u32), BigUint::from(1u32)];
    for i in 2..=n as usize {
        let next = &seq[i - 1] + &seq[i - 2];
        seq.push(next);
    }
    seq.truncate(n as usize + 1);
    seq
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_domain_matches() {
    assert_eq!(load_golden_data().max_index, MAX_INDEX);
}

#[test]
fn golden_agrees_with_bigint() {
    let golden = load_golden_data();
    let reference = bigint_reference(MAX_INDEX);
    for entry in &golden.values {
        assert_eq!(
            entry.fib,
            reference[entry.k as usize].to_string(),
            "golden F({}) disagrees with recurrence",
            entry.k
        );
    }
}

#[test]
fn every_variant_matches_golden() {
    let golden = load_golden_data();
    for entry in &golden.values {
        for variant in AlgorithmVariant::ALL {
            assert_eq!(
                compute(entry.k, variant),
                entry.expected(),
                "{variant} F({})",
                entry.k
            );
        }
    }
}

#[test]
fn whole_domain_matches_bigint() {
    let reference = bigint_reference(MAX_INDEX);
    for k in 0..=MAX_INDEX {
        let expected = reference[k as usize].to_string();
        assert_eq!(FIB_TABLE[k as usize].to_string(), expected);
        for variant in AlgorithmVariant::ALL {
            assert_eq!(compute(k, variant).to_string(), expected, "{variant} F({k})");
        }
    }
}

#[test]
fn device_reads_match_golden() {
    let golden = load_golden_data();
    let device = FibDevice::new();
    for variant in AlgorithmVariant::ALL {
        let payload = [b'0' + variant.index()];
        ControlAttribute::FibMethod.store(&device, &payload).unwrap();
        let mut session = device.open().unwrap();
        for entry in &golden.values {
            session.seek(i64::from(entry.k), Whence::Set);
            assert_eq!(session.read(), entry.expected(), "{variant} F({})", entry.k);
        }
        session.close();
    }
}

#[test]
fn reads_past_domain_return_last_golden() {
    let golden = load_golden_data();
    let last = golden
        .values
        .iter()
        .find(|e| e.k == MAX_INDEX)
        .expect("golden file covers F(92)");
    let log = client_run(
        &FibDevice::new(),
        AlgorithmVariant::FastDoublingFindLastSet,
        100,
    )
    .unwrap();
    for &(offset, value) in log.forward.iter().filter(|(o, _)| *o >= MAX_INDEX) {
        assert_eq!(value, last.expected(), "offset {offset}");
    }
}

#[test]
fn cross_variant_verification_passes() {
    let checked = verify_all_variants(&CancellationToken::new()).unwrap();
    assert_eq!(checked, (MAX_INDEX as usize + 1) * AlgorithmVariant::ALL.len());
}
