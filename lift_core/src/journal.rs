//! Exercise log journal.
//!
//! Logged exercises are appended to a JSONL (JSON Lines) file with file
//! locking so several shells can log against the same journal.

use crate::submission::ExerciseLogger;
use crate::{LogError, LogPayload, LogReceipt, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One journal line
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: LogPayload,
}

/// Logging collaborator writing to a JSONL journal
#[derive(Clone, Debug)]
pub struct JsonlLogger {
    path: PathBuf,
}

impl JsonlLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry under an exclusive lock
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended {} ({}) to journal", entry.payload.exercise_name, entry.id);
        Ok(())
    }
}

impl ExerciseLogger for JsonlLogger {
    async fn log_exercise(&self, payload: LogPayload) -> std::result::Result<LogReceipt, LogError> {
        let exercise = payload.exercise_name.clone();
        let entry = LogEntry {
            id: Uuid::new_v4(),
            logged_at: Utc::now(),
            payload,
        };

        self.append(&entry)
            .map_err(|e| LogError::new(format!("Could not log {}: {}", exercise, e)))?;

        Ok(LogReceipt {
            exercise,
            status: Some("Saved".into()),
        })
    }
}

/// Read every entry of a journal; unparsable lines are skipped
pub fn read_entries(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LogEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse journal entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from journal", entries.len());
    Ok(entries)
}
