//! Tracing setup and wide-event payloads.

use crate::errors::HaileiError;
use crate::pipeline::FinalReport;
use serde_json::{json, Value};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber for an embedding binary.
///
/// `RUST_LOG` takes precedence over `default_filter`. With `json` set,
/// events are written as one JSON object per line.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), HaileiError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| HaileiError::Config(format!("invalid log filter '{default_filter}': {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(fmt::layer().json().with_target(false)).try_init()
    } else {
        registry.with(fmt::layer().compact().with_target(false)).try_init()
    };
    result.map_err(|e| HaileiError::Config(format!("tracing already initialized: {e}")))
}

/// Builds the one-line summary of a finished run.
#[must_use]
pub fn workflow_summary(report: &FinalReport) -> Value {
    let metadata = &report.run_metadata;
    json!({
        "run_id": report.run_id.to_string(),
        "workflow": report.workflow,
        "course_title": report.course_title,
        "agents_processed": report.agents_processed,
        "start_time": metadata.start_time.to_rfc3339(),
        "end_time": metadata.end_time.to_rfc3339(),
        "elapsed_seconds": metadata.elapsed_seconds,
        "stages_succeeded": metadata.stages_succeeded,
        "final_approval": metadata.final_approval,
        "quality_score": metadata.quality_score,
        "ethical_clearance": metadata.ethical_clearance,
        "ready_for_deployment": report.ready_for_deployment(),
    })
}
