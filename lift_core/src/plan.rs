//! Week plan loading.
//!
//! The plan is a JSON file holding the current week and each day's
//! prescribed exercises in display order:
//!
//! ```json
//! { "week": 3, "days": { "1": [ { "exercise": "Squat", ... } ] } }
//! ```

use crate::{DayPlan, ExerciseRecord, FetchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Data-loading collaborator: supplies one day of the current week
#[allow(async_fn_in_trait)]
pub trait PlanSource {
    async fn load_day(&self, day: u32) -> Result<DayPlan, FetchError>;
}

/// On-disk week plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    #[serde(default)]
    pub days: BTreeMap<u32, Vec<ExerciseRecord>>,
}

impl WeekPlan {
    /// Extract one day; a day without entries is an empty day
    pub fn day(&self, day: u32) -> DayPlan {
        DayPlan {
            week: self.week,
            day,
            exercises: self.days.get(&day).cloned().unwrap_or_default(),
        }
    }
}

/// Plan source backed by a JSON file
#[derive(Clone, Debug)]
pub struct PlanFile {
    path: PathBuf,
}

impl PlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole week
    pub fn read_week(&self) -> Result<WeekPlan, FetchError> {
        if !self.path.exists() {
            tracing::info!("No plan file found at {:?}", self.path);
            return Err(FetchError::new("No workout plan found."));
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            FetchError::new(format!("Failed to read plan {}: {}", self.path.display(), e))
        })?;

        let plan: WeekPlan = serde_json::from_str(&contents).map_err(|e| {
            FetchError::new(format!("Failed to parse plan {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Loaded week {} plan from {:?}", plan.week, self.path);
        Ok(plan)
    }
}

impl PlanSource for PlanFile {
    async fn load_day(&self, day: u32) -> Result<DayPlan, FetchError> {
        let plan = self.read_week()?.day(day);
        tracing::info!(
            "Loaded day {} of week {}: {} exercises",
            day,
            plan.week,
            plan.exercises.len()
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strategy;
    use futures::executor::block_on;

    const PLAN: &str = r#"{
        "week": 3,
        "days": {
            "1": [
                {"exercise": "Bench Press", "strategy": "periodized_bench", "sets": 5,
                 "target_reps": "5", "target_weights": [100, 100, 100, 100, 100]},
                {"exercise": "Plank", "strategy": "static", "target_reps": "60s"}
            ],
            "2": []
        }
    }"#;

    #[test]
    fn test_load_day() {
        let temp_dir = tempfile::tempdir().unwrap();
        let plan_path = temp_dir.path().join("plan.json");
        std::fs::write(&plan_path, PLAN).unwrap();

        let day = block_on(PlanFile::new(&plan_path).load_day(1)).unwrap();

        assert_eq!(day.week, 3);
        assert_eq!(day.day, 1);
        assert_eq!(day.exercises.len(), 2);
        assert_eq!(day.exercises[0].strategy, Strategy::PeriodizedBench);
    }

    #[test]
    fn test_missing_day_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let plan_path = temp_dir.path().join("plan.json");
        std::fs::write(&plan_path, PLAN).unwrap();

        let day = block_on(PlanFile::new(&plan_path).load_day(5)).unwrap();

        assert_eq!(day.week, 3);
        assert!(day.exercises.is_empty());
    }

    #[test]
    fn test_missing_plan_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let plan_path = temp_dir.path().join("nonexistent.json");

        let err = block_on(PlanFile::new(&plan_path).load_day(1)).unwrap_err();

        assert_eq!(err.message, "No workout plan found.");
    }

    #[test]
    fn test_malformed_plan_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let plan_path = temp_dir.path().join("plan.json");
        std::fs::write(&plan_path, "{ invalid json }").unwrap();

        let err = block_on(PlanFile::new(&plan_path).load_day(1)).unwrap_err();

        assert!(err.message.starts_with("Failed to parse plan"));
    }
}
