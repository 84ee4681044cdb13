//! Technical-spec stage (`TFDAi`): LMS mapping and deployment requirements.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// How the course maps onto LMS objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LmsMapping {
    /// LMS modules, one per course module.
    pub modules: usize,
    /// Two quizzes per module.
    pub quizzes: usize,
    /// One discussion per module.
    pub discussions: usize,
    /// Three assignments per module.
    pub assignments: usize,
    /// Expected deployment effort.
    pub estimated_deployment_time: String,
}

impl LmsMapping {
    /// Derives the mapping from the module count.
    #[must_use]
    pub fn for_modules(modules: usize) -> Self {
        Self {
            modules,
            quizzes: modules * 2,
            discussions: modules,
            assignments: modules * 3,
            estimated_deployment_time: "2-3 hours".to_string(),
        }
    }
}

/// Produces the fixed technical specification for the target LMS.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicalSpecStage;

#[async_trait]
impl Stage for TechnicalSpecStage {
    fn id(&self) -> StageId {
        StageId::TechnicalSpec
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        if !ctx.upstream_completed() {
            return Ok(ctx.upstream_not_completed());
        }

        Ok(ctx
            .completed_output()
            .with_value(
                "technical_specifications",
                json!({
                    "target_lms": "Canvas",
                    "scorm_version": "SCORM 2004",
                    "mobile_compatible": true,
                    "accessibility_compliant": "WCAG 2.1 AA",
                    "responsive_design": true,
                    "api_integration": ["LTI 1.3", "REST API"],
                }),
            )
            .with_field("lms_mapping", &LmsMapping::for_modules(ctx.module_count()))?
            .with_value(
                "integration_requirements",
                json!([
                    "LTI 1.3 support",
                    "Grade passback enabled",
                    "Single sign-on (SSO)",
                    "Mobile app compatibility",
                    "Analytics integration",
                ]),
            )
            .with_value(
                "deployment_checklist",
                json!([
                    "Content validation complete",
                    "Accessibility audit passed",
                    "LMS compatibility verified",
                    "User acceptance testing scheduled",
                ]),
            ))
    }
}
