//! Testing utilities for the pipeline.
//!
//! This module provides:
//! - Course fixtures and pre-computed stage outputs
//! - Scripted, failing and slow text-generation clients
//! - Stage doubles for exercising the orchestrator's error paths
//! - Assertions over stage outputs

mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::{
    assert_completed, assert_error_output, assert_has_field, assert_module_count,
    assert_passthrough,
};
pub use fixtures::{author_output, context_after, course_map, plan_output, sample_course};
pub use mocks::{
    CountingStage, ErrorStatusStage, FailingStage, FailingTextClient, ScriptedTextClient,
    SlowTextClient,
};
