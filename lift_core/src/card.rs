//! Mounted presentation units.
//!
//! A card is the runtime form of a [`PresentationUnit`]: it owns the reps
//! input cells the user edits and one [`SubmissionUnit`] per exercise it can
//! log. Dropping a card discards its submission state.

use crate::grouping::PresentationUnit;
use crate::submission::{ExerciseLogger, Feedback, SubmissionState, SubmissionUnit, SubmitOutcome};
use crate::validation::{validate_reps, InvalidSets};
use crate::{ExerciseRecord, LogPayload, ValidationError};
use futures::future::LocalBoxFuture;

/// Which week and day a card logs against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogTarget {
    pub week: u32,
    pub day: u32,
}

// ============================================================================
// Manually logged exercise
// ============================================================================

/// An exercise logged from one reps input per set
#[derive(Debug)]
pub struct ExerciseCard {
    record: ExerciseRecord,
    target: LogTarget,
    reps_inputs: Vec<String>,
    unit: SubmissionUnit,
}

impl ExerciseCard {
    pub fn new(record: ExerciseRecord, target: LogTarget) -> Self {
        let reps_inputs = vec![String::new(); record.input_sets()];
        let unit = SubmissionUnit::new(record.name.clone());
        Self {
            record,
            target,
            reps_inputs,
            unit,
        }
    }

    pub fn record(&self) -> &ExerciseRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn state(&self) -> SubmissionState {
        self.unit.state()
    }

    pub fn reps_inputs(&self) -> &[String] {
        &self.reps_inputs
    }

    /// Replace the text of one set's reps input. Out-of-range sets are ignored.
    pub fn set_reps(&mut self, set: usize, text: impl Into<String>) {
        if let Some(cell) = self.reps_inputs.get_mut(set) {
            *cell = text.into();
        }
    }

    /// Build the payload from the current inputs
    pub fn payload(&self) -> Result<LogPayload, ValidationError> {
        let actual_reps = validate_reps(self.record.input_sets(), self.reps_inputs.as_slice())
            .map_err(|InvalidSets(invalid)| ValidationError::MissingReps {
                exercise: self.record.name.clone(),
                invalid,
            })?;

        Ok(LogPayload {
            week_id: self.target.week,
            day: self.target.day,
            exercise_name: self.record.name.clone(),
            actual_weights: self.record.target_weights.clone(),
            actual_reps,
        })
    }

    pub fn submit<'a, L, F>(&self, logger: &'a L, feedback: &'a F) -> LocalBoxFuture<'a, SubmitOutcome>
    where
        L: ExerciseLogger + 'a,
        F: Feedback + 'a,
    {
        self.unit.submit(|| self.payload(), logger, feedback)
    }
}

// ============================================================================
// Periodized exercise
// ============================================================================

/// A cycle-driven exercise confirmed without any input
#[derive(Debug)]
pub struct PeriodizedCard {
    record: ExerciseRecord,
    target: LogTarget,
    unit: SubmissionUnit,
}

impl PeriodizedCard {
    pub fn new(record: ExerciseRecord, target: LogTarget) -> Self {
        let unit = SubmissionUnit::new(record.name.clone());
        Self {
            record,
            target,
            unit,
        }
    }

    pub fn record(&self) -> &ExerciseRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn state(&self) -> SubmissionState {
        self.unit.state()
    }

    /// Working weight, uniform across sets
    pub fn weight(&self) -> Option<f64> {
        self.record.target_weights.first().copied()
    }

    /// Payload derived from the prescription alone: `sets` copies of the rep
    /// target and of the first target weight.
    pub fn payload(&self) -> Result<LogPayload, ValidationError> {
        let sets = self.record.sets as usize;
        let no_prescription = || ValidationError::NoPrescription {
            exercise: self.record.name.clone(),
        };

        let reps = self
            .record
            .target_reps
            .as_ref()
            .and_then(|target| target.count())
            .ok_or_else(no_prescription)?;
        let weight = match self.weight() {
            Some(weight) => weight,
            None if sets == 0 => 0.0,
            None => return Err(no_prescription()),
        };

        Ok(LogPayload {
            week_id: self.target.week,
            day: self.target.day,
            exercise_name: self.record.name.clone(),
            actual_weights: vec![weight; sets],
            actual_reps: vec![reps; sets],
        })
    }

    pub fn submit<'a, L, F>(&self, logger: &'a L, feedback: &'a F) -> LocalBoxFuture<'a, SubmitOutcome>
    where
        L: ExerciseLogger + 'a,
        F: Feedback + 'a,
    {
        self.unit.submit(|| self.payload(), logger, feedback)
    }
}

// ============================================================================
// Superset
// ============================================================================

/// One member's line within a superset set row
#[derive(Clone, Debug, PartialEq)]
pub struct SupersetEntry {
    pub member: usize,
    pub label: String,
    pub weight: f64,
}

/// All members' work for one set number
#[derive(Clone, Debug, PartialEq)]
pub struct SupersetRow {
    pub set: usize,
    pub entries: Vec<SupersetEntry>,
}

/// Two or more exercises performed in rotation, each logged on its own
#[derive(Debug)]
pub struct SupersetCard {
    tag: String,
    members: Vec<ExerciseCard>,
}

impl SupersetCard {
    pub fn new(tag: impl Into<String>, records: Vec<ExerciseRecord>, target: LogTarget) -> Self {
        Self {
            tag: tag.into(),
            members: records
                .into_iter()
                .map(|record| ExerciseCard::new(record, target))
                .collect(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn members(&self) -> &[ExerciseCard] {
        &self.members
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut ExerciseCard> {
        self.members.get_mut(index)
    }

    /// Short member label: tag plus 1-based position (`A1`, `A2`, ...)
    pub fn label(&self, index: usize) -> String {
        format!("{}{}", self.tag, index + 1)
    }

    pub fn max_sets(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.record().input_sets())
            .max()
            .unwrap_or(0)
    }

    /// Interleaved layout: for each set number, the members that have it
    pub fn rows(&self) -> Vec<SupersetRow> {
        (0..self.max_sets())
            .map(|set| SupersetRow {
                set,
                entries: self
                    .members
                    .iter()
                    .enumerate()
                    .filter_map(|(member, card)| {
                        card.record()
                            .target_weights
                            .get(set)
                            .map(|weight| SupersetEntry {
                                member,
                                label: self.label(member),
                                weight: *weight,
                            })
                    })
                    .collect(),
            })
            .collect()
    }
}

// ============================================================================
// Static block
// ============================================================================

/// The day's duration-based exercises, display only
#[derive(Debug)]
pub struct StaticBlockCard {
    records: Vec<ExerciseRecord>,
}

impl StaticBlockCard {
    pub fn new(records: Vec<ExerciseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    pub fn total_seconds(&self) -> u32 {
        self.records
            .iter()
            .filter_map(|r| r.target_reps.as_ref().and_then(|t| t.seconds()))
            .fold(0u32, u32::saturating_add)
    }

    /// Total duration as `"4m 30s"`, `"4m"` or `"45s"`
    pub fn duration_label(&self) -> String {
        let total = self.total_seconds();
        let (minutes, seconds) = (total / 60, total % 60);
        match (minutes, seconds) {
            (0, s) => format!("{}s", s),
            (m, 0) => format!("{}m", m),
            (m, s) => format!("{}m {}s", m, s),
        }
    }
}

// ============================================================================
// Mounting
// ============================================================================

/// A mounted presentation unit
#[derive(Debug)]
pub enum Card {
    Standalone(ExerciseCard),
    Periodized(PeriodizedCard),
    Superset(SupersetCard),
    StaticBlock(StaticBlockCard),
}

impl Card {
    /// Mount a unit with fresh, idle submission state
    pub fn mount(unit: PresentationUnit, target: LogTarget) -> Self {
        match unit {
            PresentationUnit::Standalone(record) => {
                Card::Standalone(ExerciseCard::new(record, target))
            }
            PresentationUnit::Periodized(record) => {
                Card::Periodized(PeriodizedCard::new(record, target))
            }
            PresentationUnit::Superset { tag, records } => {
                Card::Superset(SupersetCard::new(tag, records, target))
            }
            PresentationUnit::StaticBlock(records) => {
                Card::StaticBlock(StaticBlockCard::new(records))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::testing::*;
    use crate::TargetReps;
    use futures::executor::block_on;
    use std::collections::BTreeSet;

    const TARGET: LogTarget = LogTarget { week: 4, day: 2 };

    fn squat_card() -> ExerciseCard {
        ExerciseCard::new(
            ExerciseRecord::standard("Squat", vec![80.0, 80.0, 80.0], 5),
            TARGET,
        )
    }

    #[test]
    fn test_blank_set_blocks_submission() {
        let mut card = squat_card();
        card.set_reps(0, "5");
        card.set_reps(1, "");
        card.set_reps(2, "5");
        let logger = RecordingLogger::default();
        let feedback = RecordingFeedback::default();

        let outcome = block_on(card.submit(&logger, &feedback));

        match outcome {
            SubmitOutcome::Rejected(err) => assert_eq!(err.invalid_sets(), BTreeSet::from([1])),
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(card.state(), SubmissionState::Idle);
        assert_eq!(logger.calls(), 0);
        assert_eq!(*feedback.errors.borrow(), vec!["Fill in all reps for Squat."]);
    }

    #[test]
    fn test_corrected_input_logs_target_weights() {
        let mut card = squat_card();
        let logger = RecordingLogger::default();
        let feedback = RecordingFeedback::default();

        block_on(card.submit(&logger, &feedback));
        for set in 0..3 {
            card.set_reps(set, "5");
        }
        card.set_reps(2, " 4 ");
        let outcome = block_on(card.submit(&logger, &feedback));

        assert!(matches!(outcome, SubmitOutcome::Committed(_)));
        assert_eq!(card.state(), SubmissionState::Committed);
        assert_eq!(
            logger.payloads.borrow()[0],
            LogPayload {
                week_id: 4,
                day: 2,
                exercise_name: "Squat".into(),
                actual_weights: vec![80.0, 80.0, 80.0],
                actual_reps: vec![5, 5, 4],
            }
        );
    }

    #[test]
    fn test_set_reps_out_of_range_is_ignored() {
        let mut card = squat_card();
        card.set_reps(7, "5");
        assert_eq!(card.reps_inputs().len(), 3);
        assert!(card.reps_inputs().iter().all(|input| input.is_empty()));
    }

    #[test]
    fn test_periodized_auto_payload() {
        let mut record = ExerciseRecord::periodized("Bench Press", 5, 100.0, 5);
        record.target_reps = Some(TargetReps::Text("5".into()));
        let card = PeriodizedCard::new(record, TARGET);
        let logger = RecordingLogger::default();
        let feedback = RecordingFeedback::default();

        let outcome = block_on(card.submit(&logger, &feedback));

        assert!(matches!(outcome, SubmitOutcome::Committed(_)));
        let payloads = logger.payloads.borrow();
        assert_eq!(payloads[0].actual_reps, vec![5, 5, 5, 5, 5]);
        assert_eq!(payloads[0].actual_weights, vec![100.0; 5]);
        assert_eq!(*feedback.logged.borrow(), vec!["Bench Press saved."]);
    }

    #[test]
    fn test_periodized_uses_first_weight_for_every_set() {
        let mut record = ExerciseRecord::periodized("Bench Press", 3, 90.0, 3);
        record.target_weights = vec![90.0];
        let card = PeriodizedCard::new(record, TARGET);

        let payload = card.payload().unwrap();

        assert_eq!(payload.actual_weights, vec![90.0, 90.0, 90.0]);
        assert_eq!(payload.actual_reps, vec![3, 3, 3]);
    }

    #[test]
    fn test_periodized_without_rep_count_is_rejected() {
        let mut record = ExerciseRecord::periodized("Bench Press", 5, 100.0, 5);
        record.target_reps = Some(TargetReps::Text("AMRAP".into()));
        let card = PeriodizedCard::new(record, TARGET);
        let logger = RecordingLogger::default();
        let feedback = RecordingFeedback::default();

        let outcome = block_on(card.submit(&logger, &feedback));

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::NoPrescription { .. })
        ));
        assert_eq!(card.state(), SubmissionState::Idle);
        assert_eq!(logger.calls(), 0);
    }

    #[test]
    fn test_periodized_log_failure_allows_retry() {
        let card = PeriodizedCard::new(
            ExerciseRecord::periodized("Bench Press", 5, 100.0, 5),
            TARGET,
        );
        let feedback = RecordingFeedback::default();

        let failed = block_on(card.submit(&RecordingLogger::failing("server error"), &feedback));
        assert!(matches!(failed, SubmitOutcome::Failed(_)));
        assert_eq!(card.state(), SubmissionState::Idle);

        let logger = RecordingLogger::default();
        block_on(card.submit(&logger, &feedback));
        assert_eq!(card.state(), SubmissionState::Committed);
        assert_eq!(*feedback.errors.borrow(), vec!["server error"]);
    }

    #[test]
    fn test_superset_members_progress_independently() {
        let mut card = SupersetCard::new(
            "A",
            vec![
                ExerciseRecord::standard("Curl", vec![12.0, 12.0], 10).with_group("A"),
                ExerciseRecord::standard("Pushdown", vec![25.0, 25.0], 12).with_group("A"),
            ],
            TARGET,
        );
        let logger = RecordingLogger::default();
        let feedback = RecordingFeedback::default();

        let curl = card.member_mut(0).unwrap();
        curl.set_reps(0, "10");
        curl.set_reps(1, "9");
        card.member_mut(1).unwrap().set_reps(0, "12");

        let curl_outcome = block_on(card.members()[0].submit(&logger, &feedback));
        let pushdown_outcome = block_on(card.members()[1].submit(&logger, &feedback));

        assert!(matches!(curl_outcome, SubmitOutcome::Committed(_)));
        assert!(matches!(pushdown_outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(card.members()[0].state(), SubmissionState::Committed);
        assert_eq!(card.members()[1].state(), SubmissionState::Idle);
        assert_eq!(
            *feedback.errors.borrow(),
            vec!["Fill in all reps for Pushdown."]
        );
    }

    #[test]
    fn test_superset_rows_interleave_members() {
        let card = SupersetCard::new(
            "B",
            vec![
                ExerciseRecord::standard("Fly", vec![10.0, 12.0, 14.0], 12),
                ExerciseRecord::standard("Face Pull", vec![15.0, 15.0], 15),
            ],
            TARGET,
        );

        let rows = card.rows();

        assert_eq!(card.max_sets(), 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].entries.len(), 2);
        assert_eq!(rows[0].entries[1].label, "B2");
        assert_eq!(rows[1].entries[0].weight, 12.0);
        assert_eq!(
            rows[2].entries,
            vec![SupersetEntry {
                member: 0,
                label: "B1".into(),
                weight: 14.0
            }]
        );
    }

    #[test]
    fn test_static_block_duration() {
        let block = StaticBlockCard::new(vec![
            ExerciseRecord::timed("Plank", "60s"),
            ExerciseRecord::timed("Side Plank", "45s"),
            ExerciseRecord::timed("Hollow Hold", "30 sec"),
            ExerciseRecord::timed("Stretch", "as needed"),
        ]);

        assert_eq!(block.total_seconds(), 135);
        assert_eq!(block.duration_label(), "2m 15s");
        assert_eq!(StaticBlockCard::new(vec![]).duration_label(), "0s");
        assert_eq!(
            StaticBlockCard::new(vec![ExerciseRecord::timed("Plank", "120s")]).duration_label(),
            "2m"
        );
    }

    #[test]
    fn test_static_block_duration_saturates() {
        let block = StaticBlockCard::new(vec![
            ExerciseRecord::timed("Plank", "4000000000s"),
            ExerciseRecord::timed("Side Plank", "4000000000s"),
        ]);

        assert_eq!(block.total_seconds(), u32::MAX);
    }

    #[test]
    fn test_mount_creates_idle_cards() {
        let card = Card::mount(
            PresentationUnit::Periodized(ExerciseRecord::periodized("Bench Press", 5, 100.0, 5)),
            TARGET,
        );

        match card {
            Card::Periodized(bench) => assert_eq!(bench.state(), SubmissionState::Idle),
            other => panic!("Expected periodized card, got {:?}", other),
        }
    }
}
