//! Event sink trait and implementations.

use super::is_failure_event;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn, Level};

/// Receives workflow lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The type of event (e.g., "stage.started")
    /// * `data` - Optional event payload
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>);

    /// Emits an event without awaiting. Must never panic.
    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>);
}

/// Discards all events. Used when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event_type: &str, _data: Option<serde_json::Value>) {}

    fn try_emit(&self, _event_type: &str, _data: Option<serde_json::Value>) {}
}

/// Forwards events to `tracing`.
///
/// Failure events (`stage.failed`, `pipeline.rejected`, ...) are always
/// logged at WARN; everything else uses the configured level.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    fn log_event(&self, event_type: &str, data: Option<&serde_json::Value>) {
        let run_id = data
            .and_then(|d| d.get("run_id"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("-");
        let stage = data
            .and_then(|d| d.get("stage"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("-");

        if is_failure_event(event_type) {
            warn!(event_type, run_id, stage, event_data = ?data, "Event: {}", event_type);
        } else if self.level == Level::DEBUG {
            debug!(event_type, run_id, stage, event_data = ?data, "Event: {}", event_type);
        } else {
            info!(event_type, run_id, stage, event_data = ?data, "Event: {}", event_type);
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.log_event(event_type, data.as_ref());
    }

    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.log_event(event_type, data.as_ref());
    }
}

/// Records events in memory, for tests and embedding servers that want to
/// return the event trail with the result.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<(String, Option<serde_json::Value>)>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<(String, Option<serde_json::Value>)> {
        self.events.read().clone()
    }

    /// Returns the collected event types in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|(t, _)| t.clone()).collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events whose type equals `event_type`.
    #[must_use]
    pub fn events_named(&self, event_type: &str) -> Vec<Option<serde_json::Value>> {
        self.events
            .read()
            .iter()
            .filter(|(t, _)| t == event_type)
            .map(|(_, data)| data.clone())
            .collect()
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<(String, Option<serde_json::Value>)> {
        self.events
            .read()
            .iter()
            .filter(|(t, _)| t.starts_with(type_prefix))
            .cloned()
            .collect()
    }

    fn record(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.events.write().push((event_type.to_string(), data));
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.record(event_type, data);
    }

    fn try_emit(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.record(event_type, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED};

    #[tokio::test]
    async fn test_noop_sink() {
        let sink = NoOpEventSink;
        sink.emit(STAGE_STARTED, None).await;
        sink.try_emit(STAGE_STARTED, Some(serde_json::json!({"x": 1})));
    }

    #[tokio::test]
    async fn test_logging_sink_accepts_failures() {
        let sink = LoggingEventSink::debug();
        sink.emit(STAGE_COMPLETED, Some(serde_json::json!({"run_id": "abc"}))).await;
        sink.try_emit(STAGE_FAILED, Some(serde_json::json!({"stage": "review"})));
        sink.try_emit(STAGE_STARTED, Some(serde_json::json!("not an object")));
    }

    #[tokio::test]
    async fn test_collecting_sink_order() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.emit(STAGE_STARTED, None).await;
        sink.try_emit(STAGE_COMPLETED, Some(serde_json::json!({"stage": "plan"})));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.event_types(), vec![STAGE_STARTED, STAGE_COMPLETED]);
        assert_eq!(sink.events_named(STAGE_COMPLETED).len(), 1);
    }

    #[tokio::test]
    async fn test_collecting_sink_prefix_and_clear() {
        let sink = CollectingEventSink::new();
        sink.emit(STAGE_STARTED, None).await;
        sink.emit(STAGE_COMPLETED, None).await;
        sink.emit("pipeline.started", None).await;

        assert_eq!(sink.events_of_type("stage.").len(), 2);

        sink.clear();
        assert!(sink.is_empty());
    }
}
