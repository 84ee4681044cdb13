//! Error types for the HAILEI pipeline.
//!
//! The taxonomy separates the failures a caller can act on (validation,
//! upstream-not-completed, unhandled stage errors) from generation failures,
//! which the Plan stage absorbs and never surfaces.

use crate::core::StageId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum HaileiError {
    /// The course input was malformed or incomplete.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A stage received an input whose status was not `completed`.
    #[error("{0}")]
    UpstreamNotCompleted(#[from] UpstreamNotCompletedError),

    /// A stage failed for any other reason.
    #[error("{0}")]
    Stage(#[from] UnhandledStageError),

    /// Remote generation was unavailable and no fallback absorbed it.
    #[error("{0}")]
    Generation(#[from] GenerationUnavailable),

    /// No stage matches the requested name.
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// The whole workflow exceeded its time budget.
    #[error("Workflow timed out after {seconds}s")]
    Timeout {
        /// The budget that was exceeded.
        seconds: f64,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HaileiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl HaileiError {
    /// Returns the HTTP status code an embedding server should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::UnknownStage(_) => 400,
            Self::Timeout { .. } => 504,
            Self::UpstreamNotCompleted(_)
            | Self::Stage(_)
            | Self::Generation(_)
            | Self::Config(_)
            | Self::Serialization(_) => 500,
        }
    }

    /// Returns the agent name (`IPDAi`, `CAuthAi`, ...) of the stage the
    /// error is attributed to, if any.
    #[must_use]
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::UpstreamNotCompleted(err) => Some(err.stage.agent_name()),
            Self::Stage(err) => Some(&err.stage),
            _ => None,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = match self {
            Self::Validation(err) => err.to_dict(),
            Self::UpstreamNotCompleted(err) => err.to_dict(),
            Self::Stage(err) => err.to_dict(),
            Self::Generation(err) => err.to_dict(),
            Self::UnknownStage(name) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("UnknownStage"));
                map.insert("stage".to_string(), serde_json::json!(name));
                map
            }
            Self::Timeout { seconds } => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("Timeout"));
                map.insert("timeout_seconds".to_string(), serde_json::json!(seconds));
                map
            }
            Self::Config(_) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("ConfigError"));
                map
            }
            Self::Serialization(_) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("SerializationError"));
                map
            }
        };
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map.insert("status_code".to_string(), serde_json::json!(self.status_code()));
        map
    }
}

/// Error raised when a course input fails validation.
///
/// Lists every violated field, not only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid course input: {}", violations.join("; "))]
pub struct ValidationError {
    /// The fields that failed validation.
    pub fields: Vec<String>,
    /// One human-readable message per violation.
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Creates an empty validation error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Records a violated field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.push(field.into());
        self.violations.push(message.into());
    }

    /// Returns true if no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `Err(self)` if any violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("ValidationError"));
        map.insert("fields".to_string(), serde_json::json!(self.fields));
        map
    }
}

impl Default for ValidationError {
    fn default() -> Self {
        Self::new()
    }
}

/// Error raised when a stage receives an input whose status is not `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Stage '{stage}' halted: {reason}")]
pub struct UpstreamNotCompletedError {
    /// The stage that refused its input.
    pub stage: StageId,
    /// The reason reported by the stage.
    pub reason: String,
}

impl UpstreamNotCompletedError {
    /// Creates a new upstream-not-completed error.
    #[must_use]
    pub fn new(stage: StageId, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("UpstreamNotCompleted"));
        map.insert("stage".to_string(), serde_json::json!(self.stage.agent_name()));
        map.insert("stage_id".to_string(), serde_json::json!(self.stage));
        map.insert("reason".to_string(), serde_json::json!(self.reason));
        map
    }
}

/// Error raised for any other failure inside a stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} processing error: {message}")]
pub struct UnhandledStageError {
    /// The failing stage name.
    pub stage: String,
    /// The underlying message.
    pub message: String,
}

impl UnhandledStageError {
    /// Creates a new unhandled stage error.
    #[must_use]
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("UnhandledStageError"));
        map.insert("stage".to_string(), serde_json::json!(self.stage));
        map
    }
}

/// Why remote generation could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationFailureKind {
    /// No credential or endpoint is configured.
    NotConfigured,
    /// The request could not be sent or the service answered with an error.
    Transport,
    /// The call exceeded its time budget.
    Timeout,
    /// The returned text did not follow the expected format.
    Unparseable,
    /// The returned text was well-formed but had too few entries.
    Incomplete,
}

impl fmt::Display for GenerationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "not_configured"),
            Self::Transport => write!(f, "transport"),
            Self::Timeout => write!(f, "timeout"),
            Self::Unparseable => write!(f, "unparseable"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Recoverable failure of the optional text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Generation unavailable ({kind}): {detail}")]
pub struct GenerationUnavailable {
    /// The failure category.
    pub kind: GenerationFailureKind,
    /// Details for logs.
    pub detail: String,
}

impl GenerationUnavailable {
    /// Creates a new generation failure.
    #[must_use]
    pub fn new(kind: GenerationFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Creates a not-configured failure.
    #[must_use]
    pub fn not_configured(detail: impl Into<String>) -> Self {
        Self::new(GenerationFailureKind::NotConfigured, detail)
    }

    /// Creates a transport failure.
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(GenerationFailureKind::Transport, detail)
    }

    /// Creates a timeout failure.
    #[must_use]
    pub fn timeout(seconds: f64) -> Self {
        Self::new(
            GenerationFailureKind::Timeout,
            format!("no response within {seconds}s"),
        )
    }

    /// Creates an unparseable-response failure.
    #[must_use]
    pub fn unparseable(detail: impl Into<String>) -> Self {
        Self::new(GenerationFailureKind::Unparseable, detail)
    }

    /// Creates an incomplete-response failure.
    #[must_use]
    pub fn incomplete(expected: usize, actual: usize) -> Self {
        Self::new(
            GenerationFailureKind::Incomplete,
            format!("expected {expected} entries, got {actual}"),
        )
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("GenerationUnavailable"));
        map.insert("kind".to_string(), serde_json::json!(self.kind));
        map
    }
}
