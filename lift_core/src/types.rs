//! Core domain types for the workout logging engine.
//!
//! This module defines the wire-level shapes shared with the plan loader and
//! the logging backend:
//! - Prescribed exercises and their training strategy
//! - Outbound log payloads and inbound receipts
//! - A loaded day's plan

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group tag used by the abs routine. Exercises carrying it are never
/// interleaved as a superset; the tag only labels the routine.
pub const RESERVED_ABS_TAG: &str = "Abs";

// ============================================================================
// Strategy
// ============================================================================

/// Training strategy of a prescribed exercise
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Strategy {
    /// Manually logged, one reps input per set
    #[default]
    Standard,
    /// Fixed by the training cycle, logged without user input
    PeriodizedBench,
    /// Duration-based, display only
    Static,
    /// Any other label from the plan; classified like `Standard`
    Other(String),
}

impl Strategy {
    /// Whether records with this strategy may form a superset
    pub fn is_groupable(&self) -> bool {
        matches!(self, Strategy::Standard | Strategy::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Strategy::Standard => "standard",
            Strategy::PeriodizedBench => "periodized_bench",
            Strategy::Static => "static",
            Strategy::Other(label) => label,
        }
    }
}

impl From<Option<String>> for Strategy {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") | Some("standard") => Strategy::Standard,
            Some("periodized_bench") => Strategy::PeriodizedBench,
            Some("static") => Strategy::Static,
            Some(other) => Strategy::Other(other.to_string()),
        }
    }
}

impl From<Strategy> for String {
    fn from(value: Strategy) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Rep targets
// ============================================================================

/// Prescribed reps: a count for every set, or free text such as `"60s"`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetReps {
    Count(u32),
    Text(String),
}

impl TargetReps {
    /// Rep count, reading the leading digits of a text target (`"5"`, `"8 reps"`)
    pub fn count(&self) -> Option<u32> {
        match self {
            TargetReps::Count(n) => Some(*n),
            TargetReps::Text(text) => {
                let digits: String = text
                    .trim_start()
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            }
        }
    }

    /// First run of digits anywhere in the target, read as seconds
    pub fn seconds(&self) -> Option<u32> {
        match self {
            TargetReps::Count(n) => Some(*n),
            TargetReps::Text(text) => {
                let digits: String = text
                    .chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

impl fmt::Display for TargetReps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetReps::Count(n) => write!(f, "{}", n),
            TargetReps::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// Exercise records
// ============================================================================

/// One prescribed exercise of a day's plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(rename = "exercise")]
    pub name: String,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub target_reps: Option<TargetReps>,
    #[serde(default)]
    pub target_weights: Vec<f64>,
    #[serde(default, rename = "superset_group")]
    pub group_tag: Option<String>,
}

impl ExerciseRecord {
    /// A manually logged exercise, one set per target weight
    pub fn standard(name: impl Into<String>, target_weights: Vec<f64>, reps: u32) -> Self {
        Self {
            name: name.into(),
            strategy: Strategy::Standard,
            sets: target_weights.len() as u32,
            target_reps: Some(TargetReps::Count(reps)),
            target_weights,
            group_tag: None,
        }
    }

    /// A cycle-driven exercise with the same weight on every set
    pub fn periodized(name: impl Into<String>, sets: u32, weight: f64, reps: u32) -> Self {
        Self {
            name: name.into(),
            strategy: Strategy::PeriodizedBench,
            sets,
            target_reps: Some(TargetReps::Count(reps)),
            target_weights: vec![weight; sets as usize],
            group_tag: None,
        }
    }

    /// A timed hold or other duration-based exercise
    pub fn timed(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: Strategy::Static,
            sets: 0,
            target_reps: Some(TargetReps::Text(duration.into())),
            target_weights: Vec::new(),
            group_tag: None,
        }
    }

    pub fn with_group(mut self, tag: impl Into<String>) -> Self {
        self.group_tag = Some(tag.into());
        self
    }

    /// Group tag, treating an empty tag as no tag
    pub fn tag(&self) -> Option<&str> {
        self.group_tag.as_deref().filter(|tag| !tag.is_empty())
    }

    /// Number of reps inputs a manual card collects
    pub fn input_sets(&self) -> usize {
        self.target_weights.len()
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

/// A completed exercise sent to the logging backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogPayload {
    pub week_id: u32,
    pub day: u32,
    #[serde(rename = "exercise")]
    pub exercise_name: String,
    #[serde(rename = "actual_weight")]
    pub actual_weights: Vec<f64>,
    pub actual_reps: Vec<u32>,
}

/// Backend acknowledgement of a logged exercise
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReceipt {
    pub exercise: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A loaded day: the current week and its prescribed exercises in order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub week: u32,
    pub day: u32,
    pub exercises: Vec<ExerciseRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategies() {
        let json = r#"[
            {"exercise": "Squat", "strategy": "standard"},
            {"exercise": "Bench Press", "strategy": "periodized_bench"},
            {"exercise": "Plank", "strategy": "static"},
            {"exercise": "Row", "strategy": "linear"},
            {"exercise": "Curl", "strategy": null},
            {"exercise": "Dip"}
        ]"#;
        let records: Vec<ExerciseRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].strategy, Strategy::Standard);
        assert_eq!(records[1].strategy, Strategy::PeriodizedBench);
        assert_eq!(records[2].strategy, Strategy::Static);
        assert_eq!(records[3].strategy, Strategy::Other("linear".into()));
        assert!(records[3].strategy.is_groupable());
        assert_eq!(records[4].strategy, Strategy::Standard);
        assert_eq!(records[5].strategy, Strategy::Standard);
    }

    #[test]
    fn test_parse_backend_record() {
        let json = r#"{
            "exercise": "Incline DB Press",
            "sets": 3,
            "target_reps": 10,
            "target_weights": [22.5, 22.5, 20.0],
            "superset_group": "A",
            "strategy": "linear",
            "rounding": 2.5
        }"#;
        let record: ExerciseRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "Incline DB Press");
        assert_eq!(record.sets, 3);
        assert_eq!(record.target_reps, Some(TargetReps::Count(10)));
        assert_eq!(record.input_sets(), 3);
        assert_eq!(record.tag(), Some("A"));
    }

    #[test]
    fn test_empty_group_tag_is_no_tag() {
        let record = ExerciseRecord::standard("Squat", vec![80.0], 5).with_group("");
        assert_eq!(record.tag(), None);
    }

    #[test]
    fn test_target_reps_count() {
        assert_eq!(TargetReps::Count(8).count(), Some(8));
        assert_eq!(TargetReps::Text("5".into()).count(), Some(5));
        assert_eq!(TargetReps::Text(" 12 reps".into()).count(), Some(12));
        assert_eq!(TargetReps::Text("AMRAP".into()).count(), None);
    }

    #[test]
    fn test_target_reps_seconds() {
        assert_eq!(TargetReps::Text("60s".into()).seconds(), Some(60));
        assert_eq!(TargetReps::Text("hold 45 sec".into()).seconds(), Some(45));
        assert_eq!(TargetReps::Text("to failure".into()).seconds(), None);
    }

    #[test]
    fn test_payload_wire_names() {
        let payload = LogPayload {
            week_id: 3,
            day: 1,
            exercise_name: "Squat".into(),
            actual_weights: vec![80.0, 80.0],
            actual_reps: vec![5, 5],
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["week_id"], 3);
        assert_eq!(value["exercise"], "Squat");
        assert_eq!(value["actual_weight"][1], 80.0);
        assert_eq!(value["actual_reps"][0], 5);
    }
}
