//! Lifecycle events emitted while a workflow runs.
//!
//! The orchestrator owns one [`EventSink`] and hands it to every stage
//! through its [`StageContext`](crate::context::StageContext). Sinks must
//! never fail the workflow: emission is fire-and-forget.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// A workflow run started.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// A workflow run finished with the ethics-audit output.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// A workflow run stopped at a failing stage.
pub const PIPELINE_FAILED: &str = "pipeline.failed";
/// A workflow run was refused before any stage ran.
pub const PIPELINE_REJECTED: &str = "pipeline.rejected";
/// A stage was invoked.
pub const STAGE_STARTED: &str = "stage.started";
/// A stage returned a completed output.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// A stage returned an error output or failed.
pub const STAGE_FAILED: &str = "stage.failed";
/// The Plan stage fell back to templates for one section.
pub const GENERATION_FALLBACK: &str = "generation.fallback";

/// Returns true for event types that report a problem.
#[must_use]
pub fn is_failure_event(event_type: &str) -> bool {
    matches!(
        event_type,
        PIPELINE_FAILED | PIPELINE_REJECTED | STAGE_FAILED | GENERATION_FALLBACK
    )
}
