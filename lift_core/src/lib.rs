#![forbid(unsafe_code)]

//! Exercise presentation and logging engine for the Lift workout tracker.
//!
//! This crate provides:
//! - Domain types (exercise records, strategies, log payloads)
//! - Grouping of a day's exercises into presentation units
//! - Feed assembly (display order)
//! - Reps validation
//! - Per-exercise submission state machine and mounted cards
//! - Plan file loading and a JSONL log journal

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod grouping;
pub mod feed;
pub mod validation;
pub mod submission;
pub mod card;
pub mod session;
pub mod plan;
pub mod journal;

// Re-export commonly used types
pub use error::{Error, FetchError, LogError, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use grouping::{classify, PresentationUnit};
pub use feed::{assemble, build_feed};
pub use validation::{validate_reps, InvalidSets};
pub use submission::{ExerciseLogger, Feedback, SubmissionState, SubmissionUnit, SubmitOutcome};
pub use card::{Card, ExerciseCard, LogTarget, PeriodizedCard, StaticBlockCard, SupersetCard};
pub use session::{DaySession, Loggable};
pub use plan::{PlanFile, PlanSource, WeekPlan};
pub use journal::{read_entries, JsonlLogger, LogEntry};
