//! Typed records carried inside stage payloads.
//!
//! Stages exchange flat mappings; these records give each payload field a
//! concrete shape on the way in and out.

mod authoring;
mod course;
mod enrichment;
mod plan;

pub use authoring::{ContentSummary, DetailedContent, DetailedModule, ScormPackage};
pub use course::{CourseInfo, CourseInput, CourseLevel, DEFAULT_WEEKS, MIN_GOALS};
pub use enrichment::{EnrichedModule, KnowledgeSources, ResourceQuality, ResourceSummary};
pub use plan::{CourseModule, Kdka, LearningObjectives, PedagogicalFrameworks, Prrr};

/// PRRR alignment attached to each authored module; same shape as the plan's
/// PRRR framework.
pub type PrrrAlignment = Prrr;
