//! Ethics-audit stage (`EthosAi`): compliance and final approval.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

/// Inclusivity score reported by every audit.
pub(crate) const INCLUSIVITY_SCORE: u64 = 96;

/// Produces the ethics audit and the final deployment approval.
///
/// Terminal stage: its output is the workflow's final output.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthicsAuditStage;

#[async_trait]
impl Stage for EthicsAuditStage {
    fn id(&self) -> StageId {
        StageId::EthicsAudit
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        if !ctx.upstream_completed() {
            return Ok(ctx.upstream_not_completed());
        }

        Ok(ctx
            .completed_output()
            .with_value(
                "ethical_audit",
                json!({
                    "bias_detection": "no bias detected",
                    "inclusivity_score": INCLUSIVITY_SCORE,
                    "cultural_sensitivity": "reviewed and approved",
                    "privacy_compliance": "FERPA compliant",
                    "accessibility_audit": "exceeds UDL guidelines",
                    "ethical_ai_usage": "transparent and appropriate",
                    "data_protection": "privacy by design implemented",
                }),
            )
            .with_value(
                "compliance_checklist",
                json!({
                    "academic_integrity": true,
                    "inclusive_language": true,
                    "cultural_awareness": true,
                    "accessibility_standards": true,
                    "ethical_ai_use": true,
                    "student_privacy": true,
                    "data_security": true,
                    "copyright_compliance": true,
                }),
            )
            .with_value(
                "recommendations",
                json!([
                    "Continue monitoring for bias in future updates",
                    "Regular accessibility audits recommended quarterly",
                    "Student feedback integration suggested for continuous improvement",
                    "Cultural sensitivity review annual recommended",
                    "Privacy impact assessment completed successfully",
                ]),
            )
            .with_value(
                "final_approval",
                json!({
                    "ethical_clearance": "approved",
                    "ready_for_deployment": true,
                    "approval_date": Utc::now().to_rfc3339(),
                    "approval_level": "full production clearance",
                    "compliance_officer": format!("EthosAi v{}", ctx.agent_version()),
                }),
            )
            .with_value(
                "audit_trail",
                json!({
                    "reviewed_components": ["content", "assessments", "activities", "resources"],
                    "ethical_frameworks_applied": [
                        "Universal Design for Learning",
                        "Cultural Responsiveness",
                        "Academic Integrity",
                    ],
                    "stakeholder_considerations": [
                        "students",
                        "instructors",
                        "institution",
                        "broader_community",
                    ],
                }),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    #[tokio::test]
    async fn test_final_approval() {
        let mut input = Map::new();
        input.insert("status".into(), json!("completed"));
        input.insert("agent".into(), json!("EditorAi"));

        let output = EthicsAuditStage
            .execute(&StageContext::new(StageId::EthicsAudit, input))
            .await
            .unwrap();

        assert_eq!(output.agent, "EthosAi");
        assert_eq!(output.pointer("/final_approval/ready_for_deployment"), Some(&json!(true)));
        assert_eq!(output.pointer("/final_approval/compliance_officer"), Some(&json!("EthosAi v1.0")));
        assert_eq!(output.pointer("/ethical_audit/inclusivity_score"), Some(&json!(96)));

        let checklist = output.get("compliance_checklist").and_then(Value::as_object).unwrap();
        assert_eq!(checklist.len(), 8);
        assert!(checklist.values().all(|v| v == &json!(true)));
    }

    #[tokio::test]
    async fn test_error_input_short_circuits() {
        let mut input = Map::new();
        input.insert("status".into(), json!("error"));
        let output = EthicsAuditStage
            .execute(&StageContext::new(StageId::EthicsAudit, input))
            .await
            .unwrap();
        assert!(output.get("final_approval").is_none());
    }
}
