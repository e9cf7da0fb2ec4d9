//! Retention-decay math: difficulty, stability, and the forgetting curve.
//!
//! Formulas follow FSRS-4.5; see
//! <https://github.com/open-spaced-repetition/fsrs4anki/wiki/The-Algorithm>.

use crate::algorithm::fuzz::apply_fuzz;
use crate::parameters::Parameters;
use crate::types::Grade;

/// Forgetting-curve decay exponent, fixed by the model.
const DECAY: f64 = -0.5;

// Weight positions; see the `Parameters` defaults for the full legend.
const W_INIT_DIFFICULTY: usize = 4;
const W_INIT_DIFFICULTY_STEP: usize = 5;
const W_DIFFICULTY_STEP: usize = 6;
const W_MEAN_REVERSION: usize = 7;
const W_RECALL_GROWTH: usize = 8;
const W_STABILITY_DECAY: usize = 9;
const W_RETRIEVABILITY_EFFECT: usize = 10;
const W_FORGET_BASE: usize = 11;
const W_FORGET_DIFFICULTY: usize = 12;
const W_FORGET_STABILITY: usize = 13;
const W_FORGET_RETRIEVABILITY: usize = 14;
const W_HARD_PENALTY: usize = 15;

/// Stateless forgetting-curve model over a fixed parameter set.
#[derive(Debug, Clone)]
pub(crate) struct Model {
    pub params: Parameters,
    /// 0.9^(1/DECAY) - 1, chosen so that R(t=s, s) = 0.9.
    factor: f64,
    /// Scales stability into the interval hitting `request_retention`.
    interval_modifier: f64,
}

impl Model {
    pub fn new(params: Parameters) -> Self {
        let factor = 0.9_f64.powf(1.0 / DECAY) - 1.0;
        let interval_modifier = params.request_retention.powf(1.0 / DECAY) / factor;
        Self {
            params,
            factor,
            interval_modifier,
        }
    }

    /// Stability after the first rating: S0(G) = w[G-1], floored at 0.1.
    pub fn init_stability(&self, grade: Grade) -> f64 {
        self.params.w[grade.to_value() as usize - 1].max(0.1)
    }

    /// Difficulty after the first rating: D0(G) = w4 - w5 * (G - 3).
    pub fn init_difficulty(&self, grade: Grade) -> f64 {
        constrain_difficulty(
            self.params.w[W_INIT_DIFFICULTY]
                - self.params.w[W_INIT_DIFFICULTY_STEP] * (f64::from(grade.to_value()) - 3.0),
        )
    }

    /// Difficulty after a subsequent rating, mean-reverted toward w4.
    pub fn next_difficulty(&self, difficulty: f64, grade: Grade) -> f64 {
        let next = difficulty
            - self.params.w[W_DIFFICULTY_STEP] * (f64::from(grade.to_value()) - 3.0);
        constrain_difficulty(self.mean_reversion(self.params.w[W_INIT_DIFFICULTY], next))
    }

    /// w7 * init + (1 - w7) * current, pulling difficulty back toward its
    /// default to avoid ease hell.
    fn mean_reversion(&self, init: f64, current: f64) -> f64 {
        let weight = self.params.w[W_MEAN_REVERSION];
        weight * init + (1.0 - weight) * current
    }

    /// Stability after a successful review (Hard, Good or Easy).
    ///
    /// S'(D,S,R,G) = S * (1 + e^w8 * (11-D) * S^-w9 * (e^(w10*(1-R)) - 1)
    /// * hard_penalty * easy_bonus)
    pub fn next_recall_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
        grade: Grade,
    ) -> f64 {
        // Both multipliers read w[15] in this parameter set.
        let hard_penalty = if grade == Grade::Hard {
            self.params.w[W_HARD_PENALTY]
        } else {
            1.0
        };
        let easy_bonus = if grade == Grade::Easy {
            self.params.w[W_HARD_PENALTY]
        } else {
            1.0
        };
        stability
            * (1.0
                + self.params.w[W_RECALL_GROWTH].exp()
                    * (11.0 - difficulty)
                    * stability.powf(-self.params.w[W_STABILITY_DECAY])
                    * ((self.params.w[W_RETRIEVABILITY_EFFECT] * (1.0 - retrievability)).exp()
                        - 1.0)
                    * hard_penalty
                    * easy_bonus)
    }

    /// Stability after a lapse (Again).
    ///
    /// S'(D,S,R) = w11 * D^-w12 * ((S+1)^w13 - 1) * e^(w14*(1-R))
    pub fn next_forget_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
    ) -> f64 {
        round2(
            self.params.w[W_FORGET_BASE]
                * difficulty.powf(-self.params.w[W_FORGET_DIFFICULTY])
                * ((stability + 1.0).powf(self.params.w[W_FORGET_STABILITY]) - 1.0)
                * ((1.0 - retrievability) * self.params.w[W_FORGET_RETRIEVABILITY]).exp(),
        )
    }

    /// Recall probability after `elapsed_days` at the given stability.
    ///
    /// R(t,S) = (1 + FACTOR * t / S)^DECAY
    pub fn forgetting_curve(&self, elapsed_days: u64, stability: f64) -> f64 {
        (1.0 + self.factor * elapsed_days as f64 / stability).powf(DECAY)
    }

    /// Whole days until the next review for the given stability, fuzzed
    /// and clamped to [1, maximum_interval].
    pub fn next_interval(&self, stability: f64, seed: &str) -> u64 {
        let interval = apply_fuzz(
            stability * self.interval_modifier,
            seed,
            self.params.enable_fuzz,
        );
        interval.round().max(1.0).min(self.params.maximum_interval) as u64
    }
}

/// Clamp difficulty into [1, 10] after rounding to 2 decimals.
fn constrain_difficulty(difficulty: f64) -> f64 {
    round2(difficulty).clamp(1.0, 10.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
