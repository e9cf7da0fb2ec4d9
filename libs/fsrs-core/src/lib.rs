//! Pure scheduling core for flashcard spaced repetition.
//!
//! Implements the FSRS-4.5 forgetting-curve model (difficulty, stability,
//! retrievability) and the card lifecycle state machine over it.
//!
//! Provides:
//! - [`Fsrs`]: the scheduling engine, returning the four candidate
//!   outcomes (one per grade) for a review together with audit logs
//! - [`Fsrs::rollback`] and [`Fsrs::forget`]: log-driven undo and manual
//!   reset
//! - Deterministic interval fuzzing, seeded per review
//!
//! The crate is a pure function library: no persistence, no I/O, no
//! shared mutable state. Hosts own card storage and apply whichever
//! candidate the reviewer picked.

pub mod algorithm;
pub mod error;
pub mod parameters;
pub mod types;

pub use algorithm::Fsrs;
pub use error::{FsrsError, Result};
pub use parameters::{Parameters, WEIGHT_COUNT};
pub use types::{Card, Grade, Rating, RecordLog, RecordLogItem, ReviewLog, State};
