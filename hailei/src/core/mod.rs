//! Core domain model types for the pipeline.
//!
//! This module contains the fundamental types every stage shares:
//! - Stage identity and status enums
//! - The stage output mapping with its metadata block

mod output;
mod status;

pub use output::{StageMetadata, StageOutput, HEADER_KEYS};
pub use status::{StageId, StageStatus};
