//! Scheduler configuration: model weights, target retention, interval cap.

use crate::error::{FsrsError, Result};
use serde::{Deserialize, Serialize};

/// Number of model weights in a parameter set (FSRS-4.5).
pub const WEIGHT_COUNT: usize = 17;

/// Scheduler configuration, read-only once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Target recall probability at review time (0-1).
    pub request_retention: f64,
    /// Upper bound on any scheduled interval, in days.
    pub maximum_interval: f64,
    /// FSRS-4.5 model weights.
    pub w: [f64; WEIGHT_COUNT],
    /// Apply deterministic jitter to computed intervals.
    pub enable_fuzz: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            request_retention: 0.9,
            maximum_interval: 36500.0,
            w: [
                0.4, 0.6, 2.4, 5.8, // w[0-3]: initial stability for Again, Hard, Good, Easy
                4.93, // w[4]: initial difficulty base
                0.94, // w[5]: initial difficulty per-grade step
                0.86, // w[6]: difficulty step on review
                0.01, // w[7]: mean reversion weight
                1.49, // w[8]: recall stability growth
                0.14, // w[9]: stability decay
                0.94, // w[10]: retrievability effect
                2.18, // w[11]: forget stability base
                0.05, // w[12]: difficulty on forget
                0.34, // w[13]: stability on forget
                1.26, // w[14]: retrievability on forget
                0.29, // w[15]: hard penalty
                2.61, // w[16]: easy bonus
            ],
            enable_fuzz: false,
        }
    }
}

impl Parameters {
    /// Build a parameter set from a host-provided weight slice, keeping
    /// defaults for everything else.
    ///
    /// Fails unless the slice holds exactly [`WEIGHT_COUNT`] entries.
    pub fn with_weights(weights: &[f64]) -> Result<Self> {
        let w: [f64; WEIGHT_COUNT] = weights
            .try_into()
            .map_err(|_| FsrsError::InvalidWeightCount { found: weights.len() })?;
        Ok(Self { w, ..Self::default() })
    }
}
