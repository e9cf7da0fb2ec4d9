//! Candidate outcomes: the four tentative next cards for one review.

use crate::types::{Card, Grade, RecordLog, RecordLogItem, ReviewLog, State};
use chrono::{DateTime, Duration, Utc};

/// Whole days from `earlier` to `now`, clamped at zero.
pub(crate) fn days_between(now: DateTime<Utc>, earlier: DateTime<Utc>) -> u64 {
    (now - earlier).num_days().max(0) as u64
}

/// The four candidate next cards for a single review, one per grade,
/// plus the snapshot fields needed for the audit logs.
#[derive(Debug, Clone)]
pub(crate) struct Candidates {
    pub again: Card,
    pub hard: Card,
    pub good: Card,
    pub easy: Card,
    prev_last_review: DateTime<Utc>,
    prev_elapsed_days: u64,
}

impl Candidates {
    /// Snapshot the card, advance its review bookkeeping, and fan out
    /// four independent copies.
    pub fn new(card: &Card, now: DateTime<Utc>) -> Self {
        let prev_last_review = card.last_review.unwrap_or(card.due);
        let prev_elapsed_days = card.elapsed_days;

        let mut advanced = card.clone();
        advanced.elapsed_days = match (card.state, card.last_review) {
            (State::New, _) | (_, None) => 0,
            (_, Some(last_review)) => days_between(now, last_review),
        };
        advanced.last_review = Some(now);
        advanced.reps += 1;

        Self {
            again: advanced.clone(),
            hard: advanced.clone(),
            good: advanced.clone(),
            easy: advanced,
            prev_last_review,
            prev_elapsed_days,
        }
    }

    /// Days since the last review, as computed at construction.
    pub fn elapsed_days(&self) -> u64 {
        self.good.elapsed_days
    }

    /// Advance every candidate to its post-review state.
    ///
    /// |     S\G    |    Again   |    Hard    |    Good    |    Easy    |
    /// | :--------: | :--------: | :--------: | :--------: | :--------: |
    /// |     New    |  Learning  |  Learning  |  Learning  |   Review   |
    /// |  Learning  |  Learning  |  Learning  |   Review   |   Review   |
    /// |   Review   | Relearning |   Review   |   Review   |   Review   |
    /// | Relearning | Relearning | Relearning |   Review   |   Review   |
    pub fn update_state(&mut self, state: State) {
        match state {
            State::New => {
                self.again.state = State::Learning;
                self.hard.state = State::Learning;
                self.good.state = State::Learning;
                self.easy.state = State::Review;
            }
            State::Learning | State::Relearning => {
                self.again.state = state;
                self.hard.state = state;
                self.good.state = State::Review;
                self.easy.state = State::Review;
            }
            State::Review => {
                self.again.state = State::Relearning;
                self.hard.state = State::Review;
                self.good.state = State::Review;
                self.easy.state = State::Review;
            }
        }
    }

    /// Assign scheduled days and due dates from the per-grade intervals.
    ///
    /// Again always goes back into a five-minute learning step; Hard with
    /// a zero interval gets a ten-minute step instead of a day count.
    pub fn schedule(
        &mut self,
        now: DateTime<Utc>,
        hard_interval: u64,
        good_interval: u64,
        easy_interval: u64,
    ) {
        self.again.scheduled_days = 0;
        self.hard.scheduled_days = hard_interval;
        self.good.scheduled_days = good_interval;
        self.easy.scheduled_days = easy_interval;

        self.again.due = now + Duration::minutes(5);
        self.hard.due = if hard_interval > 0 {
            now + Duration::days(hard_interval as i64)
        } else {
            now + Duration::minutes(10)
        };
        self.good.due = now + Duration::days(good_interval as i64);
        self.easy.due = now + Duration::days(easy_interval as i64);
    }

    /// Pair every candidate with an audit log entry snapshotting the
    /// original card.
    pub fn record_log(self, card: &Card, now: DateTime<Utc>) -> RecordLog {
        let item = |grade: Grade, candidate: &Card| RecordLogItem {
            card: candidate.clone(),
            log: ReviewLog {
                rating: grade.into(),
                prev_due: card.due,
                prev_stability: card.stability,
                prev_difficulty: card.difficulty,
                prev_elapsed_days: self.prev_elapsed_days,
                prev_scheduled_days: card.scheduled_days,
                prev_state: card.state,
                prev_last_review: Some(self.prev_last_review),
                elapsed_days: candidate.elapsed_days,
                review: now,
            },
        };

        RecordLog {
            again: item(Grade::Again, &self.again),
            hard: item(Grade::Hard, &self.hard),
            good: item(Grade::Good, &self.good),
            easy: item(Grade::Easy, &self.easy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn reviewed_card() -> Card {
        Card {
            stability: 5.0,
            difficulty: 5.0,
            elapsed_days: 2,
            scheduled_days: 5,
            reps: 3,
            state: State::Review,
            last_review: Some(at(1)),
            ..Card::new(at(1))
        }
    }

    #[test]
    fn advancing_updates_review_bookkeeping() {
        let card = reviewed_card();
        let candidates = Candidates::new(&card, at(8));
        assert_eq!(candidates.elapsed_days(), 7);
        assert_eq!(candidates.good.reps, 4);
        assert_eq!(candidates.good.last_review, Some(at(8)));
        // Candidates are identical until states and intervals diverge.
        assert_eq!(candidates.again, candidates.easy);
    }

    #[test]
    fn new_card_has_zero_elapsed_days() {
        let card = Card::new(at(1));
        let candidates = Candidates::new(&card, at(8));
        assert_eq!(candidates.elapsed_days(), 0);
    }

    #[test]
    fn new_card_transitions() {
        let card = Card::new(at(1));
        let mut candidates = Candidates::new(&card, at(1));
        candidates.update_state(State::New);
        assert_eq!(candidates.again.state, State::Learning);
        assert_eq!(candidates.hard.state, State::Learning);
        assert_eq!(candidates.good.state, State::Learning);
        assert_eq!(candidates.easy.state, State::Review);
    }

    #[test]
    fn learning_card_transitions() {
        let card = Card::new(at(1));
        let mut candidates = Candidates::new(&card, at(1));
        candidates.update_state(State::Learning);
        assert_eq!(candidates.again.state, State::Learning);
        assert_eq!(candidates.hard.state, State::Learning);
        assert_eq!(candidates.good.state, State::Review);
        assert_eq!(candidates.easy.state, State::Review);
    }

    #[test]
    fn review_card_transitions() {
        let card = reviewed_card();
        let mut candidates = Candidates::new(&card, at(8));
        candidates.update_state(State::Review);
        assert_eq!(candidates.again.state, State::Relearning);
        assert_eq!(candidates.hard.state, State::Review);
        assert_eq!(candidates.good.state, State::Review);
        assert_eq!(candidates.easy.state, State::Review);
    }

    #[test]
    fn relearning_card_transitions() {
        let card = reviewed_card();
        let mut candidates = Candidates::new(&card, at(8));
        candidates.update_state(State::Relearning);
        assert_eq!(candidates.again.state, State::Relearning);
        assert_eq!(candidates.hard.state, State::Relearning);
        assert_eq!(candidates.good.state, State::Review);
        assert_eq!(candidates.easy.state, State::Review);
    }

    #[test]
    fn schedule_assigns_intervals_and_due_dates() {
        let card = reviewed_card();
        let now = at(8);
        let mut candidates = Candidates::new(&card, now);
        candidates.schedule(now, 4, 10, 15);

        assert_eq!(candidates.again.scheduled_days, 0);
        assert_eq!(candidates.again.due, now + Duration::minutes(5));
        assert_eq!(candidates.hard.scheduled_days, 4);
        assert_eq!(candidates.hard.due, now + Duration::days(4));
        assert_eq!(candidates.good.due, now + Duration::days(10));
        assert_eq!(candidates.easy.due, now + Duration::days(15));
    }

    #[test]
    fn zero_hard_interval_becomes_ten_minute_step() {
        let card = Card::new(at(1));
        let now = at(1);
        let mut candidates = Candidates::new(&card, now);
        candidates.schedule(now, 0, 1, 2);
        assert_eq!(candidates.hard.scheduled_days, 0);
        assert_eq!(candidates.hard.due, now + Duration::minutes(10));
    }

    #[test]
    fn record_log_snapshots_the_original_card() {
        let card = reviewed_card();
        let now = at(8);
        let mut candidates = Candidates::new(&card, now);
        candidates.update_state(card.state);
        let log = candidates.record_log(&card, now);

        for (grade, item) in log.iter() {
            assert_eq!(item.log.rating.to_value(), grade.to_value());
            assert_eq!(item.log.prev_due, card.due);
            assert_eq!(item.log.prev_stability, card.stability);
            assert_eq!(item.log.prev_difficulty, card.difficulty);
            assert_eq!(item.log.prev_elapsed_days, 2);
            assert_eq!(item.log.prev_scheduled_days, 5);
            assert_eq!(item.log.prev_state, State::Review);
            assert_eq!(item.log.prev_last_review, Some(at(1)));
            assert_eq!(item.log.elapsed_days, 7);
            assert_eq!(item.log.review, now);
        }
    }

    #[test]
    fn unreviewed_card_snapshots_due_as_last_review() {
        let card = Card::new(at(1));
        let candidates = Candidates::new(&card, at(1));
        let log = candidates.record_log(&card, at(1));
        assert_eq!(log.good.log.prev_last_review, Some(card.due));
    }
}
