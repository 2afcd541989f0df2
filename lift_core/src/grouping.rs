//! Grouping of a day's exercise list into presentation units.
//!
//! Rules:
//! - `static` records all go to one static block, whatever their tag
//! - `periodized_bench` records always render on their own
//! - Two or more groupable records sharing a tag form one superset,
//!   placed where the first member appeared
//! - Everything else is standalone, including lone tagged records and
//!   records carrying [`RESERVED_ABS_TAG`]

use crate::{ExerciseRecord, Strategy, RESERVED_ABS_TAG};
use std::collections::{HashMap, HashSet};

/// One self-contained renderable grouping of exercises
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationUnit {
    Standalone(ExerciseRecord),
    Periodized(ExerciseRecord),
    Superset {
        tag: String,
        records: Vec<ExerciseRecord>,
    },
    StaticBlock(Vec<ExerciseRecord>),
}

impl PresentationUnit {
    /// Exercise names in display order
    pub fn exercise_names(&self) -> Vec<&str> {
        match self {
            PresentationUnit::Standalone(record) | PresentationUnit::Periodized(record) => {
                vec![record.name.as_str()]
            }
            PresentationUnit::Superset { records, .. } | PresentationUnit::StaticBlock(records) => {
                records.iter().map(|r| r.name.as_str()).collect()
            }
        }
    }

    pub fn is_static_block(&self) -> bool {
        matches!(self, PresentationUnit::StaticBlock(_))
    }
}

/// Tag under which a record may join a superset, if any
fn superset_tag(record: &ExerciseRecord) -> Option<&str> {
    if !record.strategy.is_groupable() {
        return None;
    }
    record.tag().filter(|tag| *tag != RESERVED_ABS_TAG)
}

/// Partition a day's records into presentation units.
///
/// Output order follows the first appearance of each unit. The static block
/// sits at the position of the first static record; use
/// [`crate::feed::assemble`] to move it to the end.
pub fn classify(records: &[ExerciseRecord]) -> Vec<PresentationUnit> {
    let mut members: HashMap<&str, Vec<&ExerciseRecord>> = HashMap::new();
    for record in records {
        if let Some(tag) = superset_tag(record) {
            members.entry(tag).or_default().push(record);
        }
    }

    let mut units = Vec::new();
    let mut emitted_groups: HashSet<&str> = HashSet::new();
    let mut static_slot: Option<usize> = None;
    let mut static_records = Vec::new();

    for record in records {
        match record.strategy {
            Strategy::Static => {
                if static_slot.is_none() {
                    static_slot = Some(units.len());
                    units.push(PresentationUnit::StaticBlock(Vec::new()));
                }
                static_records.push(record.clone());
                continue;
            }
            Strategy::PeriodizedBench => {
                if record.tag().is_some() {
                    tracing::debug!(
                        "Periodized exercise {} keeps standalone rendering despite its group tag",
                        record.name
                    );
                }
                units.push(PresentationUnit::Periodized(record.clone()));
                continue;
            }
            Strategy::Standard | Strategy::Other(_) => {}
        }

        let group = superset_tag(record).and_then(|tag| {
            members
                .get(tag)
                .filter(|group| group.len() >= 2)
                .map(|group| (tag, group))
        });

        match group {
            Some((tag, group)) => {
                if emitted_groups.insert(tag) {
                    units.push(PresentationUnit::Superset {
                        tag: tag.to_string(),
                        records: group.iter().map(|r| (*r).clone()).collect(),
                    });
                }
            }
            None => {
                if let Some(tag) = record.tag() {
                    tracing::warn!(
                        "Exercise {} has group tag {:?} without a partner, rendering standalone",
                        record.name,
                        tag
                    );
                }
                units.push(PresentationUnit::Standalone(record.clone()));
            }
        }
    }

    if let Some(slot) = static_slot {
        units[slot] = PresentationUnit::StaticBlock(static_records);
    }

    units
}
