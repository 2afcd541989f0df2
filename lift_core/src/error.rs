//! Error types for the lift_core library.

use std::collections::BTreeSet;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Set input rejected before submission
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Logging collaborator refused or failed a submission
    #[error("Submission error: {0}")]
    Submission(#[from] LogError),

    /// Day plan could not be loaded
    #[error("Load error: {0}")]
    Load(#[from] FetchError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Local rejection of a submission; the logger is never called.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more reps inputs were blank or unparsable
    #[error("Fill in all reps for {exercise}.")]
    MissingReps {
        exercise: String,
        invalid: BTreeSet<usize>,
    },

    /// A periodized prescription has no usable rep count or weight
    #[error("{exercise} has no fixed prescription to log.")]
    NoPrescription { exercise: String },
}

impl ValidationError {
    /// Set indices the host should mark as invalid
    pub fn invalid_sets(&self) -> BTreeSet<usize> {
        match self {
            ValidationError::MissingReps { invalid, .. } => invalid.clone(),
            ValidationError::NoPrescription { .. } => BTreeSet::new(),
        }
    }
}

/// Failure reported by the logging collaborator. The message is shown verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LogError {
    pub message: String,
}

impl LogError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by the data-loading collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
