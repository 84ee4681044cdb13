//! Workflow orchestration.
//!
//! The [`Orchestrator`] is the only component with cross-stage knowledge:
//! it validates the course input, runs the stages strictly in order,
//! stops at the first stage that does not complete, and assembles the
//! [`FinalReport`].

mod orchestrator;
mod report;

pub use orchestrator::Orchestrator;
pub use report::{FinalReport, RunMetadata, WORKFLOW_NAME};
