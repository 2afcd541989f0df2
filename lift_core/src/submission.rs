//! Per-exercise submission state machine.
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Committed
//!                      |
//!                      +--validation or log failure--> Idle
//! ```
//!
//! The gate check, the transition to `Submitting` and validation all run
//! synchronously inside [`SubmissionUnit::submit`]. The returned future only
//! awaits the logger, so a second `submit` issued before it resolves always
//! sees `Submitting` and is ignored.
//!
//! The future holds a weak handle to the unit's state. Dropping the unit
//! while a log call is outstanding discards the late response. Dropping the
//! future instead returns the unit to `Idle` so it can be submitted again.

use crate::{LogError, LogPayload, LogReceipt, ValidationError};
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Logging collaborator: accepts one completed exercise
#[allow(async_fn_in_trait)]
pub trait ExerciseLogger {
    async fn log_exercise(&self, payload: LogPayload) -> Result<LogReceipt, LogError>;
}

/// User-facing notification channels of the hosting shell
pub trait Feedback {
    fn on_error(&self, message: &str);
    fn on_logged(&self, message: &str);
}

/// Observable state of one submission unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Committed,
}

/// Result of one `submit` call
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Logged; the unit is now committed
    Committed(LogReceipt),
    /// The unit was not idle; nothing happened
    Ignored,
    /// Local validation failed; the logger was not called
    Rejected(ValidationError),
    /// The logger failed; the unit is idle again
    Failed(LogError),
    /// The unit was dropped before the logger answered
    Discarded,
}

/// Submission state of one exercise, owned by the card that logs it
#[derive(Debug)]
pub struct SubmissionUnit {
    exercise: String,
    state: Rc<Cell<SubmissionState>>,
}

impl SubmissionUnit {
    pub fn new(exercise: impl Into<String>) -> Self {
        Self {
            exercise: exercise.into(),
            state: Rc::new(Cell::new(SubmissionState::Idle)),
        }
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Run one submission attempt.
    ///
    /// `validate` builds the payload or rejects the input. Errors go to
    /// `feedback.on_error`, a successful log to `feedback.on_logged`.
    pub fn submit<'a, V, L, F>(
        &self,
        validate: V,
        logger: &'a L,
        feedback: &'a F,
    ) -> LocalBoxFuture<'a, SubmitOutcome>
    where
        V: FnOnce() -> Result<LogPayload, ValidationError>,
        L: ExerciseLogger + 'a,
        F: Feedback + 'a,
    {
        if self.state.get() != SubmissionState::Idle {
            tracing::debug!(
                "Ignoring submit for {} while {:?}",
                self.exercise,
                self.state.get()
            );
            return future::ready(SubmitOutcome::Ignored).boxed_local();
        }

        self.state.set(SubmissionState::Submitting);
        tracing::debug!("{}: Idle -> Submitting", self.exercise);

        let payload = match validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.state.set(SubmissionState::Idle);
                tracing::debug!("{}: validation failed, back to Idle", self.exercise);
                feedback.on_error(&err.to_string());
                return future::ready(SubmitOutcome::Rejected(err)).boxed_local();
            }
        };

        let mut in_flight = InFlight {
            state: Rc::downgrade(&self.state),
            exercise: self.exercise.clone(),
            settled: false,
        };

        async move {
            let result = logger.log_exercise(payload).await;
            in_flight.settled = true;
            let exercise = in_flight.exercise.clone();

            let Some(state) = in_flight.state.upgrade() else {
                tracing::debug!("{}: unit unmounted, dropping log response", exercise);
                return SubmitOutcome::Discarded;
            };

            match result {
                Ok(receipt) => {
                    state.set(SubmissionState::Committed);
                    tracing::info!("{}: committed", exercise);
                    feedback.on_logged(&format!("{} saved.", receipt.exercise));
                    SubmitOutcome::Committed(receipt)
                }
                Err(err) => {
                    state.set(SubmissionState::Idle);
                    tracing::debug!("{}: log failed: {}", exercise, err);
                    feedback.on_error(&err.message);
                    SubmitOutcome::Failed(err)
                }
            }
        }
        .boxed_local()
    }
}

/// Owned by a pending submission. Dropping it before the logger answers
/// returns a still-mounted unit to `Idle`.
struct InFlight {
    state: Weak<Cell<SubmissionState>>,
    exercise: String,
    settled: bool,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            if state.get() == SubmissionState::Submitting {
                state.set(SubmissionState::Idle);
                tracing::debug!("{}: submission abandoned, back to Idle", self.exercise);
            }
        }
    }
}
