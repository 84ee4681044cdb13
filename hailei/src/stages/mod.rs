//! Stage trait and the six pipeline stages.
//!
//! Every stage reads the previous stage's output from its
//! [`StageContext`] and returns its own output. Stages after Plan refuse
//! inputs whose status is not `completed` by returning an error-status
//! output instead of failing.

mod author;
mod enrich;
mod ethics_audit;
mod plan;
mod review;
mod technical_spec;

pub use author::AuthorStage;
pub use enrich::EnrichStage;
pub use ethics_audit::EthicsAuditStage;
pub use plan::PlanStage;
pub use review::ReviewStage;
pub use technical_spec::{LmsMapping, TechnicalSpecStage};

use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use crate::generation::ContentGenerator;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A unit of the instructional-design pipeline.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the stage identity.
    fn id(&self) -> StageId;

    /// Returns the stage name.
    fn name(&self) -> &str {
        self.id().as_str()
    }

    /// Executes the stage.
    ///
    /// An input that is not `completed` yields `Ok` with an error-status
    /// output. `Err` is reserved for validation failures and unexpected
    /// processing errors.
    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError>;
}

/// The six stages in execution order.
#[must_use]
pub fn default_stages(generator: Arc<dyn ContentGenerator>) -> Vec<Arc<dyn Stage>> {
    vec![
        Arc::new(PlanStage::new(generator)),
        Arc::new(AuthorStage),
        Arc::new(EnrichStage),
        Arc::new(TechnicalSpecStage),
        Arc::new(ReviewStage),
        Arc::new(EthicsAuditStage),
    ]
}

/// A stage backed by a synchronous function, for substituting a single
/// stage in tests or custom pipelines.
pub struct FnStage<F>
where
    F: Fn(&StageContext) -> Result<StageOutput, HaileiError> + Send + Sync,
{
    id: StageId,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(&StageContext) -> Result<StageOutput, HaileiError> + Send + Sync,
{
    /// Creates a function-backed stage.
    pub fn new(id: StageId, func: F) -> Self {
        Self { id, func }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn(&StageContext) -> Result<StageOutput, HaileiError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage").field("id", &self.id).finish()
    }
}

#[async_trait]
impl<F> Stage for FnStage<F>
where
    F: Fn(&StageContext) -> Result<StageOutput, HaileiError> + Send + Sync,
{
    fn id(&self) -> StageId {
        self.id
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        (self.func)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::TemplateGenerator;
    use serde_json::Map;

    #[test]
    fn test_default_stages_order() {
        let stages = default_stages(Arc::new(TemplateGenerator::new()));
        let ids: Vec<_> = stages.iter().map(|s| s.id()).collect();
        assert_eq!(ids, StageId::ALL.to_vec());
        assert_eq!(stages[3].name(), "technical_spec");
    }

    #[tokio::test]
    async fn test_fn_stage() {
        let stage = FnStage::new(StageId::Review, |ctx| Ok(ctx.completed_output()));
        assert_eq!(stage.name(), "review");

        let ctx = StageContext::new(StageId::Review, Map::new());
        let output = stage.execute(&ctx).await.unwrap();
        assert!(output.is_completed());
        assert_eq!(output.agent, "EditorAi");
    }
}
