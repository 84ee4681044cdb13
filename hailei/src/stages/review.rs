//! Review stage (`EditorAi`): quality review report.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use async_trait::async_trait;
use serde_json::json;

/// Engagement score reported by every review.
pub(crate) const ENGAGEMENT_SCORE: u64 = 91;

/// Produces the quality review. Scores are constants, not measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewStage;

#[async_trait]
impl Stage for ReviewStage {
    fn id(&self) -> StageId {
        StageId::Review
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        if !ctx.upstream_completed() {
            return Ok(ctx.upstream_not_completed());
        }

        Ok(ctx
            .completed_output()
            .with_value(
                "review_results",
                json!({
                    "grammar_check": "passed",
                    "clarity_score": 94,
                    "blooms_alignment": "verified",
                    "accessibility_score": 96,
                    "kdka_compliance": "validated",
                    "prrr_integration": "confirmed",
                    "readability_grade": "appropriate",
                    "content_consistency": "excellent",
                }),
            )
            .with_value(
                "enhancements_made",
                json!([
                    "Improved sentence structure for clarity",
                    "Added comprehensive alt text for visual elements",
                    "Verified Bloom's taxonomy verb usage across all modules",
                    "Enhanced PRRR framework integration",
                    "Standardized formatting and terminology",
                    "Optimized content for mobile accessibility",
                ]),
            )
            .with_value(
                "quality_metrics",
                json!({
                    "readability_level": "appropriate for course level",
                    "content_length": "optimal for learning objectives",
                    "engagement_score": ENGAGEMENT_SCORE,
                    "pedagogical_soundness": "excellent",
                    "accessibility_compliance": "WCAG 2.1 AA",
                    "mobile_optimization": "fully responsive",
                }),
            )
            .with_value(
                "validation_checklist",
                json!([
                    "Grammar and spelling verified",
                    "Learning objectives alignment confirmed",
                    "Accessibility standards met",
                    "Mobile responsiveness tested",
                    "Content accuracy validated",
                ]),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[tokio::test]
    async fn test_review_document() {
        let mut input = Map::new();
        input.insert("status".into(), json!("completed"));
        input.insert("course_title".into(), json!("Stats"));

        let output = ReviewStage
            .execute(&StageContext::new(StageId::Review, input))
            .await
            .unwrap();

        assert_eq!(output.source_agent.as_deref(), Some("TFDAi"));
        assert_eq!(output.pointer("/review_results/clarity_score"), Some(&json!(94)));
        assert_eq!(output.pointer("/quality_metrics/engagement_score"), Some(&json!(91)));
        assert_eq!(output.get("enhancements_made").and_then(|v| v.as_array()).map(Vec::len), Some(6));
    }
}
