//! Core types for the scheduler: cards, ratings, states, and audit logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Card lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for State {
    fn default() -> Self {
        Self::New
    }
}

/// Rating recorded on a review log.
///
/// `Manual` marks entries written by non-review operations (a manual
/// reset) and never appears as a schedulable grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Manual,
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to numeric value (0-4, `Manual` is 0).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Manual => 0,
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }
}

/// One of the four answers a reviewer can grade a card with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// All grades in rating order.
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }
}

impl From<Grade> for Rating {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::Again => Self::Again,
            Grade::Hard => Self::Hard,
            Grade::Good => Self::Good,
            Grade::Easy => Self::Easy,
        }
    }
}

/// A single memorized item's scheduling fields.
///
/// Owned by the caller and passed by reference into the engine; every
/// engine operation returns new card values and leaves its input intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Due date of the next review (the date when recall probability
    /// decays to the target retention).
    pub due: DateTime<Utc>,
    /// Interval in days at which recall probability equals the target.
    pub stability: f64,
    /// Intrinsic difficulty, constrained to [1, 10] once initialized.
    pub difficulty: f64,
    /// Days between the review before last and the last review.
    pub elapsed_days: u64,
    /// Days originally scheduled until this review.
    pub scheduled_days: u64,
    /// Review count.
    pub reps: u64,
    /// Forgetting events (Review -> Relearning transitions).
    pub lapses: u64,
    pub state: State,
    /// Date of the most recent review, `None` until first reviewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,
}

impl Card {
    /// A fresh card in the `New` state, due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            due: now,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            last_review: None,
        }
    }
}

/// Immutable audit record of one scheduling decision.
///
/// Captures the full prior card snapshot; a log alone is enough to
/// reconstruct the card as it was before the review (`Fsrs::rollback`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
    pub rating: Rating,
    pub prev_due: DateTime<Utc>,
    pub prev_stability: f64,
    pub prev_difficulty: f64,
    pub prev_elapsed_days: u64,
    pub prev_scheduled_days: u64,
    pub prev_state: State,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_last_review: Option<DateTime<Utc>>,
    /// Days elapsed since the review prior to this one.
    pub elapsed_days: u64,
    /// Date of this review.
    pub review: DateTime<Utc>,
}

/// A candidate next card paired with the log entry that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordLogItem {
    pub card: Card,
    pub log: ReviewLog,
}

/// Scheduling output: exactly one [`RecordLogItem`] per grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordLog {
    pub again: RecordLogItem,
    pub hard: RecordLogItem,
    pub good: RecordLogItem,
    pub easy: RecordLogItem,
}

impl RecordLog {
    /// The outcome for a grade.
    pub fn get(&self, grade: Grade) -> &RecordLogItem {
        match grade {
            Grade::Again => &self.again,
            Grade::Hard => &self.hard,
            Grade::Good => &self.good,
            Grade::Easy => &self.easy,
        }
    }

    /// Consume the log set, keeping only the chosen grade's outcome.
    pub fn into_item(self, grade: Grade) -> RecordLogItem {
        match grade {
            Grade::Again => self.again,
            Grade::Hard => self.hard,
            Grade::Good => self.good,
            Grade::Easy => self.easy,
        }
    }

    /// Iterate outcomes in grade order.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, &RecordLogItem)> + '_ {
        Grade::ALL.iter().map(move |&grade| (grade, self.get(grade)))
    }
}

impl Index<Grade> for RecordLog {
    type Output = RecordLogItem;

    fn index(&self, grade: Grade) -> &Self::Output {
        self.get(grade)
    }
}
