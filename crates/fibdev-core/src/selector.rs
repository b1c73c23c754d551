//! Active algorithm selection.

use parking_lot::RwLock;
use tracing::info;

use crate::variant::AlgorithmVariant;

/// Holds the variant used by subsequent reads.
///
/// Selection is device-wide configuration and is not guarded by the
/// session lock; the `RwLock` only keeps individual updates atomic.
pub struct AlgorithmSelector {
    active: RwLock<AlgorithmVariant>,
}

impl AlgorithmSelector {
    /// Create a selector starting at `AlgorithmVariant::Iterative`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_variant(AlgorithmVariant::default())
    }

    /// Create a selector starting at `variant`.
    #[must_use]
    pub fn with_variant(variant: AlgorithmVariant) -> Self {
        Self {
            active: RwLock::new(variant),
        }
    }

    /// Select by numeric index. Indices past the last variant clamp to it.
    pub fn select(&self, requested: u32) -> AlgorithmVariant {
        let variant = AlgorithmVariant::from_index_clamped(requested);
        self.set(variant);
        variant
    }

    /// Select a variant directly.
    pub fn set(&self, variant: AlgorithmVariant) {
        *self.active.write() = variant;
        info!("fib method: {}", variant.index());
    }

    /// Currently active variant.
    #[must_use]
    pub fn current(&self) -> AlgorithmVariant {
        *self.active.read()
    }
}

impl Default for AlgorithmSelector {
    fn default() -> Self {
        Self::new()
    }
}
