//! Per-invocation context handed to each stage.

mod identity;
mod stage;

pub use identity::RunIdentity;
pub use stage::{StageContext, UNKNOWN_COURSE};
