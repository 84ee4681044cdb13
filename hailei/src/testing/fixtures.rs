//! Shared course fixtures.

use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::HaileiError;
use crate::generation::TemplateGenerator;
use crate::model::{CourseInput, CourseLevel};
use crate::stages::{AuthorStage, PlanStage, Stage};
use serde_json::{Map, Value};
use std::sync::Arc;

/// The two-week introductory AI course used across the test suite.
#[must_use]
pub fn sample_course() -> CourseInput {
    CourseInput::new(
        "Introduction to Artificial Intelligence",
        "A comprehensive introduction to AI",
    )
    .with_level(CourseLevel::Introductory)
    .with_domain("Computer Science")
    .with_goals(["Understand core AI concepts", "Evaluate AI applications"])
    .with_weeks(2)
}

/// Serializes a course into the mapping the Plan stage consumes.
#[must_use]
pub fn course_map(course: &CourseInput) -> Map<String, Value> {
    match serde_json::to_value(course) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

async fn run(stage: &dyn Stage, input: Map<String, Value>) -> Result<StageOutput, HaileiError> {
    stage.execute(&StageContext::new(stage.id(), input)).await
}

/// Template-generated Plan output for [`sample_course`].
///
/// # Panics
///
/// Panics if the Plan stage fails, which indicates a broken fixture.
pub async fn plan_output() -> StageOutput {
    let stage = PlanStage::new(Arc::new(TemplateGenerator::new()));
    match run(&stage, course_map(&sample_course())).await {
        Ok(output) => output,
        Err(err) => panic!("plan fixture failed: {err}"),
    }
}

/// Author output built on [`plan_output`].
///
/// # Panics
///
/// Panics if a stage fails, which indicates a broken fixture.
pub async fn author_output() -> StageOutput {
    let plan = plan_output().await;
    let input = match plan.to_map() {
        Ok(map) => map,
        Err(err) => panic!("plan fixture did not serialize: {err}"),
    };
    match run(&AuthorStage, input).await {
        Ok(output) => output,
        Err(err) => panic!("author fixture failed: {err}"),
    }
}

/// Context for `stage` fed with `upstream`.
///
/// # Panics
///
/// Panics if `upstream` cannot be serialized.
#[must_use]
pub fn context_after(stage: StageId, upstream: &StageOutput) -> StageContext {
    match StageContext::from_output(stage, upstream) {
        Ok(ctx) => ctx,
        Err(err) => panic!("fixture output did not serialize: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_course_is_valid() {
        assert!(sample_course().validate().is_ok());
        assert_eq!(course_map(&sample_course())["weeks"], 2);
    }

    #[tokio::test]
    async fn test_fixture_chain() {
        let author = author_output().await;
        assert!(author.is_completed());
        assert_eq!(context_after(StageId::Enrich, &author).module_count(), 2);
    }
}
