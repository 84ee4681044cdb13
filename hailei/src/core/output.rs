//! Stage output mapping shared by every stage.

use super::{StageId, StageStatus};
use crate::errors::{HaileiError, UnhandledStageError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by the output header; everything else is stage payload.
pub const HEADER_KEYS: [&str; 6] = [
    "agent",
    "status",
    "course_title",
    "source_agent",
    "reason",
    "metadata",
];

/// Metadata block attached to every stage output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMetadata {
    /// When the output was produced.
    pub generated_date: DateTime<Utc>,
    /// Version string of the producing agent.
    pub agent_version: String,
    /// When the consumed upstream output was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_data_date: Option<DateTime<Utc>>,
    /// Stage-specific metadata entries.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StageMetadata {
    /// Creates metadata stamped with the current time.
    #[must_use]
    pub fn new(agent_version: impl Into<String>) -> Self {
        Self {
            generated_date: Utc::now(),
            agent_version: agent_version.into(),
            source_data_date: None,
            extra: Map::new(),
        }
    }
}

impl Default for StageMetadata {
    fn default() -> Self {
        Self::new("1.0")
    }
}

/// The output of a stage.
///
/// Serializes to a flat mapping: the header fields sit next to the stage
/// payload, so the whole output can be fed to the next stage as its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput {
    /// Agent name of the producing stage.
    pub agent: String,

    /// Whether downstream stages may consume this output.
    pub status: StageStatus,

    /// Title of the course being designed.
    #[serde(default)]
    pub course_title: String,

    /// Agent whose output this stage consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_agent: Option<String>,

    /// Why the stage refused its input (error outputs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Output metadata.
    #[serde(default)]
    pub metadata: StageMetadata,

    /// Stage payload, including fields passed through from upstream.
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl StageOutput {
    /// Creates a completed output with an empty payload.
    #[must_use]
    pub fn completed(
        stage: StageId,
        course_title: impl Into<String>,
        agent_version: impl Into<String>,
    ) -> Self {
        Self {
            agent: stage.agent_name().to_string(),
            status: StageStatus::Completed,
            course_title: course_title.into(),
            source_agent: None,
            reason: None,
            metadata: StageMetadata::new(agent_version),
            data: Map::new(),
        }
    }

    /// Creates an error output carrying a reason and no payload.
    #[must_use]
    pub fn error(
        stage: StageId,
        course_title: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            agent: stage.agent_name().to_string(),
            status: StageStatus::Error,
            course_title: course_title.into(),
            source_agent: None,
            reason: Some(reason.into()),
            metadata: StageMetadata::default(),
            data: Map::new(),
        }
    }

    /// Parses an output from a mapping.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, HaileiError> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Sets the source agent.
    #[must_use]
    pub fn with_source_agent(mut self, agent: impl Into<String>) -> Self {
        self.source_agent = Some(agent.into());
        self
    }

    /// Sets the upstream generation date.
    #[must_use]
    pub fn with_source_data_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.metadata.source_data_date = date;
        self
    }

    /// Copies every payload field of `upstream`, leaving header keys behind.
    #[must_use]
    pub fn with_passthrough(mut self, upstream: &Map<String, Value>) -> Self {
        for (key, value) in upstream {
            if !HEADER_KEYS.contains(&key.as_str()) {
                self.data.insert(key.clone(), value.clone());
            }
        }
        self
    }

    /// Adds a payload field, replacing any previous value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Serializes and adds a payload field.
    pub fn with_field<T: Serialize>(self, key: impl Into<String>, value: &T) -> Result<Self, HaileiError> {
        let value = serde_json::to_value(value)?;
        Ok(self.with_value(key, value))
    }

    /// Removes a payload field.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.data.remove(key);
        self
    }

    /// Adds a single metadata entry.
    #[must_use]
    pub fn add_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.extra.insert(key.into(), value);
        self
    }

    /// Returns true if downstream stages may consume this output.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Gets a payload value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Looks up a nested payload value with a JSON pointer such as
    /// `/final_approval/ready_for_deployment`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let trimmed = pointer.strip_prefix('/')?;
        let (head, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let value = self.data.get(head)?;
        if rest.is_empty() {
            Some(value)
        } else {
            value.pointer(&format!("/{rest}"))
        }
    }

    /// Deserializes a payload field into a typed record.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, HaileiError> {
        let value = self.data.get(key).ok_or_else(|| {
            UnhandledStageError::new(self.agent.clone(), format!("missing field '{key}'"))
        })?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Converts the output to the mapping handed to the next stage.
    pub fn to_map(&self) -> Result<Map<String, Value>, HaileiError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(HaileiError::Serialization(format!(
                "stage output serialized to a non-object value: {other}"
            ))),
        }
    }
}
