//! Configuration for coordinate inversion and scanline widening.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_INV_ERR, MAX_INV_ITERATIONS};

/// Tunables of the inverse mapping search.
///
/// `max_inversion_error` is also the margin by which scanline limits are
/// widened, since every scanned polygon vertex carries that much error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Search stops once the bracket is this narrow on both axes (input pixels).
    pub max_inversion_error: f64,
    /// Iterations after which the search gives up.
    pub max_inversion_iterations: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_inversion_error: MAX_INV_ERR,
            max_inversion_iterations: MAX_INV_ITERATIONS,
        }
    }
}

impl MapConfig {
    /// Set the inversion accuracy.
    pub fn with_max_inversion_error(mut self, max_inversion_error: f64) -> Self {
        assert!(
            max_inversion_error > 0.0 && max_inversion_error.is_finite(),
            "max_inversion_error must be positive and finite"
        );
        self.max_inversion_error = max_inversion_error;
        self
    }

    /// Set the iteration limit of the inversion search.
    pub fn with_max_inversion_iterations(mut self, max_inversion_iterations: usize) -> Self {
        assert!(
            max_inversion_iterations > 0,
            "max_inversion_iterations must be positive"
        );
        self.max_inversion_iterations = max_inversion_iterations;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) {
        assert!(
            self.max_inversion_error > 0.0 && self.max_inversion_error.is_finite(),
            "max_inversion_error must be positive and finite"
        );
        assert!(
            self.max_inversion_iterations > 0,
            "max_inversion_iterations must be positive"
        );
    }
}
