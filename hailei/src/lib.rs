//! # HAILEI
//!
//! An instructional-design pipeline that turns a course description into a
//! complete design document.
//!
//! Six stages run in a fixed order, each consuming the previous stage's full
//! output:
//!
//! - **Plan** (`IPDAi`): learning objectives, KDKA/PRRR frameworks, module list
//! - **Author** (`CAuthAi`): lecture notes, activities, assessments, readings
//! - **Enrich** (`SearchAi`): knowledge sources per module
//! - **Technical spec** (`TFDAi`): LMS mapping and integration requirements
//! - **Review** (`EditorAi`): quality review report
//! - **Ethics audit** (`EthosAi`): compliance checklist and final approval
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hailei::prelude::*;
//!
//! let orchestrator = Orchestrator::new(HaileiConfig::from_env()?);
//!
//! let course = CourseInput::new(
//!     "Introduction to Artificial Intelligence",
//!     "A comprehensive introduction to AI",
//! )
//! .with_goals(["Understand core AI concepts", "Evaluate AI applications"])
//! .with_weeks(2);
//!
//! let report = orchestrator.run_complete_workflow(course).await?;
//! assert!(report.ready_for_deployment());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod generation;
pub mod model;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod syllabus;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{GenerationConfig, GenerationMode, HaileiConfig};
    pub use crate::context::{RunIdentity, StageContext};
    pub use crate::core::{StageId, StageMetadata, StageOutput, StageStatus};
    pub use crate::errors::{
        GenerationUnavailable, HaileiError, UnhandledStageError, UpstreamNotCompletedError,
        ValidationError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::generation::{
        ContentGenerator, FallbackGenerator, RemoteLlmGenerator, TemplateGenerator,
        TextGenerationClient, TextRequest,
    };
    pub use crate::model::{CourseInput, CourseLevel, CourseModule};
    pub use crate::pipeline::{FinalReport, Orchestrator, RunMetadata};
    pub use crate::stages::Stage;
    pub use crate::syllabus::render_syllabus;
}
