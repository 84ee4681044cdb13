//! Author stage (`CAuthAi`): detailed module content.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use crate::model::{ContentSummary, CourseModule, DetailedModule, ScormPackage};
use async_trait::async_trait;

/// Expands every planned module into lecture notes, activities,
/// assessments and readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorStage;

#[async_trait]
impl Stage for AuthorStage {
    fn id(&self) -> StageId {
        StageId::Author
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        if !ctx.upstream_completed() {
            return Ok(ctx.upstream_not_completed());
        }

        let modules: Vec<CourseModule> = ctx.field_or_default("course_modules")?;
        let detailed: Vec<DetailedModule> = modules.iter().map(DetailedModule::author).collect();

        ctx.completed_output()
            .with_field("scorm_package", &ScormPackage::ready(detailed.len()))?
            .with_field("content_summary", &ContentSummary::of(&detailed))?
            .with_field("detailed_modules", &detailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::plan_output;
    use serde_json::{json, Map};

    #[tokio::test]
    async fn test_author_rollups() {
        let ctx = StageContext::from_output(StageId::Author, &plan_output().await).unwrap();
        let output = AuthorStage.execute(&ctx).await.unwrap();

        assert!(output.is_completed());
        assert_eq!(output.source_agent.as_deref(), Some("IPDAi"));
        assert_eq!(output.pointer("/content_summary/total_activities"), Some(&json!(6)));
        assert_eq!(output.pointer("/content_summary/total_readings"), Some(&json!(6)));
        assert_eq!(output.pointer("/scorm_package/modules_count"), Some(&json!(2)));
        assert_eq!(
            output.pointer("/content_summary/framework_compliance"),
            Some(&json!("KDKA + PRRR + TILT"))
        );
        assert!(output.get("learning_objectives").is_some());
    }

    #[tokio::test]
    async fn test_error_input_short_circuits() {
        let mut input = Map::new();
        input.insert("status".into(), json!("error"));
        input.insert("course_title".into(), json!("Stats"));
        input.insert("course_modules".into(), json!([{"title": "ignored"}]));

        let output = AuthorStage
            .execute(&StageContext::new(StageId::Author, input))
            .await
            .unwrap();

        assert!(!output.is_completed());
        assert_eq!(output.reason.as_deref(), Some("upstream not completed"));
        assert!(output.get("detailed_modules").is_none());
    }

    #[tokio::test]
    async fn test_no_modules_yields_zero_counts() {
        let mut input = Map::new();
        input.insert("status".into(), json!("completed"));

        let output = AuthorStage
            .execute(&StageContext::new(StageId::Author, input))
            .await
            .unwrap();

        assert_eq!(output.course_title, "Unknown Course");
        assert_eq!(output.pointer("/content_summary/total_assessments"), Some(&json!(0)));
    }
}
