//! The context a stage executes against.

use super::RunIdentity;
use crate::core::{StageId, StageOutput, StageStatus};
use crate::errors::{HaileiError, UnhandledStageError};
use crate::events::{EventSink, NoOpEventSink};
use crate::model::CourseInput;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Course title used when the input carries none.
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// Keys that hold the module list, most enriched first.
const MODULE_KEYS: [&str; 3] = ["enriched_modules", "detailed_modules", "course_modules"];

/// Everything a stage may read while it runs.
///
/// The input is the previous stage's full output (or the course input for
/// the Plan stage) as a flat mapping. A context is built per invocation and
/// never shared between stages.
#[derive(Clone)]
pub struct StageContext {
    run: RunIdentity,
    stage: StageId,
    input: Map<String, Value>,
    agent_version: String,
    events: Arc<dyn EventSink>,
}

impl fmt::Debug for StageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageContext")
            .field("run_id", &self.run.run_id)
            .field("stage", &self.stage)
            .field("input_keys", &self.input.keys().collect::<Vec<_>>())
            .field("agent_version", &self.agent_version)
            .finish_non_exhaustive()
    }
}

impl StageContext {
    /// Creates a context for `stage` with a fresh run identity and no event sink.
    #[must_use]
    pub fn new(stage: StageId, input: Map<String, Value>) -> Self {
        Self {
            run: RunIdentity::new(),
            stage,
            input,
            agent_version: "1.0".to_string(),
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Creates a context from a stage output.
    pub fn from_output(stage: StageId, upstream: &StageOutput) -> Result<Self, HaileiError> {
        Ok(Self::new(stage, upstream.to_map()?))
    }

    /// Sets the run identity.
    #[must_use]
    pub fn with_run(mut self, run: RunIdentity) -> Self {
        self.run = run;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Sets the version stamped into the stage's metadata.
    #[must_use]
    pub fn with_agent_version(mut self, version: impl Into<String>) -> Self {
        self.agent_version = version.into();
        self
    }

    /// Returns the run identity.
    #[must_use]
    pub fn run(&self) -> &RunIdentity {
        &self.run
    }

    /// Returns the stage being executed.
    #[must_use]
    pub fn stage(&self) -> StageId {
        self.stage
    }

    /// Returns the raw input mapping.
    #[must_use]
    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    /// Returns the agent version.
    #[must_use]
    pub fn agent_version(&self) -> &str {
        &self.agent_version
    }

    /// Returns the status of the consumed output, if it carries a readable one.
    #[must_use]
    pub fn upstream_status(&self) -> Option<StageStatus> {
        self.input
            .get("status")
            .and_then(|status| serde_json::from_value(status.clone()).ok())
    }

    /// Returns true only if the consumed output is explicitly `completed`.
    #[must_use]
    pub fn upstream_completed(&self) -> bool {
        self.upstream_status().is_some_and(|status| status.is_completed())
    }

    /// Returns the course title carried by the input.
    #[must_use]
    pub fn course_title(&self) -> String {
        self.input
            .get("course_title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(UNKNOWN_COURSE)
            .to_string()
    }

    /// Returns the agent that produced the input, if any.
    #[must_use]
    pub fn upstream_agent(&self) -> Option<&str> {
        self.input.get("agent").and_then(Value::as_str)
    }

    /// Returns the agent to record as `source_agent`.
    ///
    /// Prefers the input's own `agent` field and otherwise names the
    /// canonical predecessor.
    #[must_use]
    pub fn source_agent(&self) -> Option<String> {
        self.upstream_agent()
            .map(ToString::to_string)
            .or_else(|| self.stage.predecessor().map(|p| p.agent_name().to_string()))
    }

    /// Returns the generation date of the consumed output.
    #[must_use]
    pub fn upstream_generated_date(&self) -> Option<DateTime<Utc>> {
        self.input
            .get("metadata")
            .and_then(|metadata| metadata.get("generated_date"))
            .and_then(|date| serde_json::from_value(date.clone()).ok())
    }

    /// Deserializes an input field into a typed record.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, HaileiError> {
        let value = self
            .input
            .get(key)
            .ok_or_else(|| self.stage_error(format!("missing field '{key}'")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| self.stage_error(format!("invalid field '{key}': {e}")).into())
    }

    /// Deserializes an input field, or returns the default if it is absent.
    pub fn field_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, HaileiError> {
        if self.input.contains_key(key) {
            self.field(key)
        } else {
            Ok(T::default())
        }
    }

    /// Reads the whole input as a course description. Malformed fields
    /// are a validation error.
    pub fn course_input(&self) -> Result<CourseInput, HaileiError> {
        Ok(CourseInput::from_map(&self.input)?)
    }

    /// Counts the modules carried by the input.
    #[must_use]
    pub fn module_count(&self) -> usize {
        MODULE_KEYS
            .iter()
            .find_map(|key| self.input.get(*key).and_then(Value::as_array))
            .map_or(0, Vec::len)
    }

    /// Starts a completed output for this stage: header, version, upstream
    /// date, source agent, and every upstream payload field.
    #[must_use]
    pub fn completed_output(&self) -> StageOutput {
        let output = StageOutput::completed(self.stage, self.course_title(), &self.agent_version)
            .with_source_data_date(self.upstream_generated_date())
            .with_passthrough(&self.input);
        match self.source_agent() {
            Some(agent) if self.stage != StageId::Plan => output.with_source_agent(agent),
            _ => output,
        }
    }

    /// Builds the error output returned when the upstream did not complete.
    #[must_use]
    pub fn upstream_not_completed(&self) -> StageOutput {
        StageOutput::error(self.stage, self.course_title(), "upstream not completed")
    }

    /// Emits an event tagged with the run and stage. Never fails.
    pub fn try_emit_event(&self, event_type: &str, data: Option<Value>) {
        let mut payload = match data {
            Some(Value::Object(map)) => map,
            Some(other) => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
            None => Map::new(),
        };
        payload.insert("run_id".to_string(), Value::String(self.run.run_id.to_string()));
        payload.insert("stage".to_string(), Value::String(self.stage.as_str().to_string()));
        self.events.try_emit(event_type, Some(Value::Object(payload)));
    }

    fn stage_error(&self, message: String) -> UnhandledStageError {
        UnhandledStageError::new(self.stage.agent_name(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_upstream_status() {
        let ctx = StageContext::new(StageId::Author, input(json!({"status": "completed"})));
        assert!(ctx.upstream_completed());

        let ctx = StageContext::new(StageId::Author, input(json!({"status": "error"})));
        assert_eq!(ctx.upstream_status(), Some(StageStatus::Error));
        assert!(!ctx.upstream_completed());

        let ctx = StageContext::new(StageId::Author, input(json!({"status": "pending"})));
        assert!(!ctx.upstream_completed());

        let ctx = StageContext::new(StageId::Author, Map::new());
        assert!(!ctx.upstream_completed());
    }

    #[test]
    fn test_course_title_fallback() {
        let ctx = StageContext::new(StageId::Review, input(json!({"course_title": "  "})));
        assert_eq!(ctx.course_title(), UNKNOWN_COURSE);

        let ctx = StageContext::new(StageId::Review, input(json!({"course_title": "Stats"})));
        assert_eq!(ctx.course_title(), "Stats");
    }

    #[test]
    fn test_source_agent_prefers_input() {
        let ctx = StageContext::new(StageId::Enrich, input(json!({"agent": "CustomAi"})));
        assert_eq!(ctx.source_agent().as_deref(), Some("CustomAi"));

        let ctx = StageContext::new(StageId::Enrich, Map::new());
        assert_eq!(ctx.source_agent().as_deref(), Some("CAuthAi"));
    }

    #[test]
    fn test_module_count_prefers_enriched() {
        let ctx = StageContext::new(
            StageId::TechnicalSpec,
            input(json!({
                "course_modules": [1, 2, 3],
                "enriched_modules": [1, 2],
            })),
        );
        assert_eq!(ctx.module_count(), 2);

        let ctx = StageContext::new(StageId::TechnicalSpec, Map::new());
        assert_eq!(ctx.module_count(), 0);
    }

    #[test]
    fn test_missing_field_is_stage_error() {
        let ctx = StageContext::new(StageId::Author, Map::new());
        let err = ctx.field::<Vec<String>>("course_modules").unwrap_err();
        assert!(matches!(err, HaileiError::Stage(_)));
        assert!(err.to_string().contains("missing field 'course_modules'"));

        let empty: Vec<String> = ctx.field_or_default("course_modules").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_completed_output_carries_header_and_passthrough() {
        let upstream = StageOutput::completed(StageId::Plan, "Stats", "1.0")
            .with_value("learning_objectives", json!({"tlo": "t", "elo": "e"}));
        let ctx = StageContext::from_output(StageId::Author, &upstream)
            .unwrap()
            .with_agent_version("2.0");

        let output = ctx.completed_output();
        assert_eq!(output.agent, "CAuthAi");
        assert_eq!(output.course_title, "Stats");
        assert_eq!(output.source_agent.as_deref(), Some("IPDAi"));
        assert_eq!(output.metadata.agent_version, "2.0");
        assert_eq!(
            output.metadata.source_data_date,
            Some(upstream.metadata.generated_date)
        );
        assert!(output.get("learning_objectives").is_some());
    }

    #[test]
    fn test_events_are_tagged() {
        let sink = Arc::new(CollectingEventSink::new());
        let ctx = StageContext::new(StageId::Plan, Map::new()).with_event_sink(sink.clone());
        ctx.try_emit_event("generation.fallback", Some(json!({"section": "modules"})));

        let events = sink.events_named("generation.fallback");
        let data = events[0].as_ref().unwrap();
        assert_eq!(data["stage"], "plan");
        assert_eq!(data["section"], "modules");
        assert_eq!(data["run_id"], ctx.run().run_id.to_string());
    }
}
