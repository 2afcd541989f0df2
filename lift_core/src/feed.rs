//! Feed assembly: display order of a day's presentation units.

use crate::grouping::{classify, PresentationUnit};
use crate::ExerciseRecord;

/// Order units for display.
///
/// Every non-static unit keeps its relative order; all static records end up
/// in a single block after them.
pub fn assemble(units: Vec<PresentationUnit>) -> Vec<PresentationUnit> {
    let mut feed = Vec::with_capacity(units.len());
    let mut static_records: Option<Vec<ExerciseRecord>> = None;

    for unit in units {
        match unit {
            PresentationUnit::StaticBlock(records) => {
                static_records.get_or_insert_with(Vec::new).extend(records);
            }
            other => feed.push(other),
        }
    }

    if let Some(records) = static_records {
        feed.push(PresentationUnit::StaticBlock(records));
    }

    feed
}

/// Classify a day's records and order them for display
pub fn build_feed(records: &[ExerciseRecord]) -> Vec<PresentationUnit> {
    let feed = assemble(classify(records));
    tracing::debug!(
        "Assembled feed of {} units from {} exercises",
        feed.len(),
        records.len()
    );
    feed
}
