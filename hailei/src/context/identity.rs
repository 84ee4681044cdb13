//! Run identity for correlating the stages of one workflow run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifies a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    /// The unique ID of this run.
    pub run_id: Uuid,

    /// The caller's request ID, if the run serves an inbound request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,

    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl Default for RunIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl RunIdentity {
    /// Creates a run identity with a fresh run ID.
    #[must_use]
    pub fn new() -> Self {
        Self::with_run_id(Uuid::new_v4())
    }

    /// Creates a run identity with a specific run ID.
    #[must_use]
    pub fn with_run_id(run_id: Uuid) -> Self {
        Self {
            run_id,
            request_id: None,
            started_at: Utc::now(),
        }
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Converts to a dictionary with string values (or null).
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("run_id".to_string(), serde_json::json!(self.run_id.to_string()));
        map.insert(
            "request_id".to_string(),
            self.request_id
                .map_or(serde_json::Value::Null, |id| serde_json::json!(id.to_string())),
        );
        map.insert(
            "started_at".to_string(),
            serde_json::json!(self.started_at.to_rfc3339()),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_identity_new_is_unique() {
        let a = RunIdentity::new();
        let b = RunIdentity::new();
        assert_ne!(a.run_id, b.run_id);
        assert!(a.request_id.is_none());
    }

    #[test]
    fn test_run_identity_to_dict() {
        let request_id = Uuid::new_v4();
        let identity = RunIdentity::new().with_request_id(request_id);
        let dict = identity.to_dict();

        assert_eq!(dict["run_id"], identity.run_id.to_string());
        assert_eq!(dict["request_id"], request_id.to_string());
        assert!(dict["started_at"].is_string());
    }

    #[test]
    fn test_run_identity_skips_missing_request_id() {
        let json = serde_json::to_value(RunIdentity::new()).unwrap();
        assert!(json.get("request_id").is_none());
    }
}
