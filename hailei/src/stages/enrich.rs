//! Enrich stage (`SearchAi`): knowledge sources per module.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use crate::model::{DetailedModule, EnrichedModule, ResourceSummary};
use async_trait::async_trait;

/// Attaches placeholder knowledge sources to every authored module.
///
/// No retrieval happens; sources are phrased around the module title.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichStage;

#[async_trait]
impl Stage for EnrichStage {
    fn id(&self) -> StageId {
        StageId::Enrich
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        if !ctx.upstream_completed() {
            return Ok(ctx.upstream_not_completed());
        }

        let modules: Vec<DetailedModule> = ctx.field_or_default("detailed_modules")?;
        let enriched: Vec<EnrichedModule> = modules.into_iter().map(EnrichedModule::enrich).collect();

        ctx.completed_output()
            .without("detailed_modules")
            .with_field("resource_summary", &ResourceSummary::of(&enriched))?
            .with_field("enriched_modules", &enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::author_output;
    use serde_json::json;

    #[tokio::test]
    async fn test_enrich_replaces_detailed_modules() {
        let ctx = StageContext::from_output(StageId::Enrich, &author_output().await).unwrap();
        let output = EnrichStage.execute(&ctx).await.unwrap();

        assert!(output.is_completed());
        assert_eq!(output.source_agent.as_deref(), Some("CAuthAi"));
        assert!(output.get("detailed_modules").is_none());
        assert_eq!(output.pointer("/resource_summary/total_sources"), Some(&json!(24)));

        let modules: Vec<EnrichedModule> = output.field("enriched_modules").unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].module.detailed_content.activities.len(), 3);
        assert!(output.get("content_summary").is_some());
    }

    #[tokio::test]
    async fn test_missing_status_short_circuits() {
        let ctx = StageContext::new(StageId::Enrich, serde_json::Map::new());
        let output = EnrichStage.execute(&ctx).await.unwrap();
        assert!(!output.is_completed());
        assert_eq!(output.agent, "SearchAi");
    }
}
