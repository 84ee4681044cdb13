//! Plan stage (`IPDAi`): objectives, frameworks and the module list.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use crate::events::GENERATION_FALLBACK;
use crate::generation::templates::MODULE_TITLE_COUNT;
use crate::generation::{ContentGenerator, Generated};
use crate::model::CourseInfo;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Turns a course description into a course plan.
///
/// Generation failures never surface here: the configured generator is
/// expected to absorb them, and each absorbed failure is reported as a
/// `generation.fallback` event.
#[derive(Clone)]
pub struct PlanStage {
    generator: Arc<dyn ContentGenerator>,
}

impl std::fmt::Debug for PlanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanStage")
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl PlanStage {
    /// Creates the stage around a generator.
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    fn report_fallback<T>(ctx: &StageContext, section: &str, generated: &Generated<T>) {
        if let Some(reason) = &generated.fallback_reason {
            ctx.try_emit_event(
                GENERATION_FALLBACK,
                Some(json!({"section": section, "reason": reason})),
            );
        }
    }
}

#[async_trait]
impl Stage for PlanStage {
    fn id(&self) -> StageId {
        StageId::Plan
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        let course = ctx.course_input()?;
        course.validate()?;

        let count = course.module_count(MODULE_TITLE_COUNT);
        let objectives = self.generator.learning_objectives(&course).await?;
        Self::report_fallback(ctx, "objectives", &objectives);
        let frameworks = self.generator.frameworks(&course).await?;
        Self::report_fallback(ctx, "frameworks", &frameworks);
        let modules = self.generator.modules(&course, count).await?;
        Self::report_fallback(ctx, "modules", &modules);

        debug!(
            run_id = %ctx.run().run_id,
            generator = self.generator.name(),
            modules = modules.value.len(),
            "Course plan generated"
        );

        Ok(
            StageOutput::completed(StageId::Plan, course.title.trim(), ctx.agent_version())
                .with_field("course_info", &CourseInfo::from(&course))?
                .with_field("learning_objectives", &objectives.value)?
                .with_field("pedagogical_frameworks", &frameworks.value)?
                .with_field("course_modules", &modules.value)?
                .add_metadata("ai_enabled", json!(self.generator.is_remote()))
                .add_metadata(
                    "content_source",
                    json!({
                        "objectives": objectives.source,
                        "frameworks": frameworks.source,
                        "modules": modules.source,
                    }),
                ),
        )
    }
}
