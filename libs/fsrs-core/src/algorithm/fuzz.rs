//! Deterministic interval jitter.
//!
//! Spreads computed intervals over a small window so cards introduced
//! together do not stay due on the same day forever. The jitter is a pure
//! function of the interval and a caller-supplied seed string.

use fnv::FnvHasher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::Hasher;

/// Intervals shorter than this are left untouched.
const MIN_FUZZABLE_INTERVAL: f64 = 2.5;

/// Apply jitter to an interval (in days), keyed by `seed`.
///
/// Returns the interval unchanged when fuzzing is disabled or the
/// interval is below the fuzzable threshold. Identical `(interval, seed)`
/// inputs always produce the identical output.
pub(crate) fn apply_fuzz(interval: f64, seed: &str, enabled: bool) -> f64 {
    if !enabled || interval < MIN_FUZZABLE_INTERVAL {
        return interval;
    }
    let mut rng = StdRng::seed_from_u64(seed_hash(seed));
    let fuzz_factor: f64 = rng.gen();
    let interval = interval.round();
    let min_ivl = (interval * 0.95 - 1.0).round().max(2.0);
    let max_ivl = (interval * 1.05 + 1.0).round();
    (fuzz_factor * (max_ivl - min_ivl + 1.0) + min_ivl).floor()
}

fn seed_hash(seed: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(seed.as_bytes());
    hasher.finish()
}
