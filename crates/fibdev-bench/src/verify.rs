//! Cross-variant verification over the whole index domain.

use rayon::prelude::*;
use tracing::info;

use fibdev_core::engine::compute;
use fibdev_core::{AlgorithmVariant, CancellationToken, DeviceError, MAX_INDEX};

/// Compare every variant against the iterative reference for every index.
///
/// Returns the number of values checked, or the first mismatch found.
pub fn verify_all_variants(cancel: &CancellationToken) -> Result<usize, DeviceError> {
    verify_variants(&AlgorithmVariant::ALL, cancel)
}

/// Same as [`verify_all_variants`] for a chosen set of variants.
pub fn verify_variants(
    variants: &[AlgorithmVariant],
    cancel: &CancellationToken,
) -> Result<usize, DeviceError> {
    let reference = AlgorithmVariant::Iterative;

    (0..=MAX_INDEX).into_par_iter().try_for_each(|k| {
        cancel.check_cancelled()?;
        let results: Vec<(AlgorithmVariant, i64)> = std::iter::once(reference)
            .chain(variants.iter().copied())
            .map(|variant| (variant, compute(k, variant)))
            .collect();
        analyze_results(k, &results)
    })?;

    let checked = (MAX_INDEX as usize + 1) * variants.len();
    info!(checked, "all variants agree");
    Ok(checked)
}

/// Check a set of `(variant, value)` results for one index against each other.
pub fn analyze_results(index: u32, results: &[(AlgorithmVariant, i64)]) -> Result<(), DeviceError> {
    let Some(&(reference, expected)) = results.first() else {
        return Ok(());
    };
    for &(variant, actual) in &results[1..] {
        if actual != expected {
            return Err(DeviceError::Mismatch {
                index,
                reference,
                variant,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
