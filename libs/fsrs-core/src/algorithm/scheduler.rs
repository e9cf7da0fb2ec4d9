//! The scheduling engine: per-rating candidate outcomes, retrievability
//! queries, and the inverse operations (rollback and manual forget).

use crate::algorithm::model::Model;
use crate::algorithm::scheduling::{days_between, Candidates};
use crate::error::{FsrsError, Result};
use crate::parameters::Parameters;
use crate::types::{Card, Grade, Rating, RecordLog, RecordLogItem, ReviewLog, State};
use chrono::{DateTime, Duration, Utc};

/// FSRS scheduling engine over a fixed parameter set.
///
/// Purely functional: every operation copies its inputs and returns new
/// values, so a shared engine needs no locking. Hosts persist whichever
/// candidate card the reviewer picked, together with its log entry.
#[derive(Debug, Clone)]
pub struct Fsrs {
    model: Model,
}

impl Default for Fsrs {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl Fsrs {
    pub fn new(params: Parameters) -> Self {
        Self {
            model: Model::new(params),
        }
    }

    /// Compute the four review choices for `card` at `now`.
    ///
    /// Returns one candidate card and audit log entry per grade. The
    /// caller's card is left untouched; applying a choice means replacing
    /// it with the chosen candidate.
    pub fn schedule(&self, card: &Card, now: DateTime<Utc>) -> RecordLog {
        let mut s = Candidates::new(card, now);
        s.update_state(card.state);
        // The fuzz seed varies per review but is fixed for a given
        // (card, now), keeping repeated calls bit-identical.
        let seed = format!("{}{}", now.timestamp_millis(), s.good.reps);
        tracing::trace!(state = ?card.state, reps = s.good.reps, "scheduling review candidates");

        match card.state {
            State::New => {
                self.init_ds(&mut s);
                s.again.due = now + Duration::minutes(1);
                s.hard.due = now + Duration::minutes(5);
                s.good.due = now + Duration::minutes(10);
                let easy_interval = self.model.next_interval(s.easy.stability, &seed);
                s.easy.scheduled_days = easy_interval;
                s.easy.due = now + Duration::days(easy_interval as i64);
            }
            State::Learning | State::Relearning => {
                let hard_interval = 0;
                let good_interval = self.model.next_interval(s.good.stability, &seed);
                let easy_interval = self
                    .model
                    .next_interval(s.easy.stability, &seed)
                    .max(good_interval + 1);
                s.schedule(now, hard_interval, good_interval, easy_interval);
            }
            State::Review => {
                let elapsed_days = s.elapsed_days();
                let last_difficulty = card.difficulty;
                let last_stability = card.stability;
                let retrievability = self.model.forgetting_curve(elapsed_days, last_stability);
                self.next_ds(&mut s, last_difficulty, last_stability, retrievability);

                let mut hard_interval = self.model.next_interval(s.hard.stability, &seed);
                let mut good_interval = self.model.next_interval(s.good.stability, &seed);
                hard_interval = hard_interval.min(good_interval);
                good_interval = good_interval.max(hard_interval + 1);
                let easy_interval = self
                    .model
                    .next_interval(s.easy.stability, &seed)
                    .max(good_interval + 1);
                s.schedule(now, hard_interval, good_interval, easy_interval);
            }
        }

        s.record_log(card, now)
    }

    /// Display-only recall probability for a Review-state card at `now`,
    /// as a percentage with two decimals.
    pub fn retrievability_percent(&self, card: &Card, now: DateTime<Utc>) -> Option<String> {
        if card.state != State::Review {
            return None;
        }
        let last_review = card.last_review?;
        let elapsed = days_between(now, last_review);
        let retrievability = self.model.forgetting_curve(elapsed, card.stability);
        Some(format!("{:.2}%", retrievability * 100.0))
    }

    /// Reconstruct the card as it was before the review captured in
    /// `log`.
    ///
    /// Manual log entries record resets rather than reviews and cannot be
    /// rolled back.
    pub fn rollback(&self, card: &Card, log: &ReviewLog) -> Result<Card> {
        if log.rating == Rating::Manual {
            return Err(FsrsError::ManualRollback);
        }
        tracing::debug!(rating = ?log.rating, prev_state = ?log.prev_state, "rolling back review");

        let (due, last_review, lapses) = match log.prev_state {
            State::New => (log.prev_last_review.unwrap_or(log.prev_due), None, 0),
            State::Learning | State::Relearning | State::Review => {
                let undo_lapse = log.rating == Rating::Again && log.prev_state == State::Review;
                (
                    log.prev_due,
                    log.prev_last_review,
                    card.lapses.saturating_sub(u64::from(undo_lapse)),
                )
            }
        };

        Ok(Card {
            due,
            stability: log.prev_stability,
            difficulty: log.prev_difficulty,
            elapsed_days: log.prev_elapsed_days,
            scheduled_days: log.prev_scheduled_days,
            reps: card.reps.saturating_sub(1),
            lapses,
            state: log.prev_state,
            last_review,
        })
    }

    /// Reset a card to New, recording a manually-rated audit entry.
    ///
    /// `reset_count` additionally zeroes the rep and lapse counters.
    pub fn forget(&self, card: &Card, now: DateTime<Utc>, reset_count: bool) -> RecordLogItem {
        let scheduled_days = match (card.state, card.last_review) {
            (State::New, _) | (_, None) => 0,
            (_, Some(last_review)) => days_between(now, last_review),
        };
        tracing::debug!(state = ?card.state, reset_count, "forgetting card");

        let log = ReviewLog {
            rating: Rating::Manual,
            prev_due: card.due,
            prev_stability: card.stability,
            prev_difficulty: card.difficulty,
            prev_elapsed_days: card.elapsed_days,
            prev_scheduled_days: scheduled_days,
            prev_state: card.state,
            prev_last_review: card.last_review,
            elapsed_days: 0,
            review: now,
        };

        let forgotten = Card {
            due: now,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: if reset_count { 0 } else { card.reps },
            lapses: if reset_count { 0 } else { card.lapses },
            state: State::New,
            last_review: card.last_review,
        };

        RecordLogItem {
            card: forgotten,
            log,
        }
    }

    /// Initialize difficulty and stability on every candidate after a
    /// first rating.
    fn init_ds(&self, s: &mut Candidates) {
        s.again.difficulty = self.model.init_difficulty(Grade::Again);
        s.again.stability = self.model.init_stability(Grade::Again);
        s.hard.difficulty = self.model.init_difficulty(Grade::Hard);
        s.hard.stability = self.model.init_stability(Grade::Hard);
        s.good.difficulty = self.model.init_difficulty(Grade::Good);
        s.good.stability = self.model.init_stability(Grade::Good);
        s.easy.difficulty = self.model.init_difficulty(Grade::Easy);
        s.easy.stability = self.model.init_stability(Grade::Easy);
    }

    /// Update difficulty and stability on every candidate from the prior
    /// memory state and current retrievability. Again takes the forget
    /// branch, the rest the recall branch.
    fn next_ds(&self, s: &mut Candidates, last_d: f64, last_s: f64, retrievability: f64) {
        s.again.difficulty = self.model.next_difficulty(last_d, Grade::Again);
        s.again.stability = self.model.next_forget_stability(last_d, last_s, retrievability);
        s.hard.difficulty = self.model.next_difficulty(last_d, Grade::Hard);
        s.hard.stability =
            self.model
                .next_recall_stability(last_d, last_s, retrievability, Grade::Hard);
        s.good.difficulty = self.model.next_difficulty(last_d, Grade::Good);
        s.good.stability =
            self.model
                .next_recall_stability(last_d, last_s, retrievability, Grade::Good);
        s.easy.difficulty = self.model.next_difficulty(last_d, Grade::Easy);
        s.easy.stability =
            self.model
                .next_recall_stability(last_d, last_s, retrievability, Grade::Easy);
    }
}
