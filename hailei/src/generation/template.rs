//! Deterministic template generator.

use super::templates::TemplateBundle;
use super::{ContentGenerator, Generated};
use crate::errors::GenerationUnavailable;
use crate::model::{CourseInput, CourseModule, Kdka, LearningObjectives, PedagogicalFrameworks, Prrr};
use async_trait::async_trait;

/// Produces plan content from the keyword-selected template bundle.
///
/// Never fails and never suspends.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Creates a template generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synchronous objectives rendering.
    #[must_use]
    pub fn objectives_for(course: &CourseInput) -> LearningObjectives {
        let (tlo, elo) = TemplateBundle::select_for_objectives(&course.title).objectives(course);
        LearningObjectives { tlo, elo }
    }

    /// Synchronous frameworks rendering.
    #[must_use]
    pub fn frameworks_for(course: &CourseInput) -> PedagogicalFrameworks {
        let bundle = TemplateBundle::select(&course.title);
        let [knowledge, delivery, context, assessment] = bundle.kdka(course);
        let [personal, relatable, relative, realworld] = bundle.prrr(course);
        PedagogicalFrameworks {
            kdka: Kdka {
                knowledge,
                delivery,
                context,
                assessment,
            },
            prrr: Prrr {
                personal,
                relatable,
                relative,
                realworld,
            },
        }
    }

    /// Synchronous module rendering; at most one module per template title.
    #[must_use]
    pub fn modules_for(course: &CourseInput, count: usize) -> Vec<CourseModule> {
        TemplateBundle::select(&course.title)
            .module_titles(course, count)
            .into_iter()
            .zip(1u32..)
            .map(|(title, number)| CourseModule::from_title(number, title))
            .collect()
    }
}

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn learning_objectives(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<LearningObjectives>, GenerationUnavailable> {
        Ok(Generated::template(Self::objectives_for(course)))
    }

    async fn frameworks(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<PedagogicalFrameworks>, GenerationUnavailable> {
        Ok(Generated::template(Self::frameworks_for(course)))
    }

    async fn modules(
        &self,
        course: &CourseInput,
        count: usize,
    ) -> Result<Generated<Vec<CourseModule>>, GenerationUnavailable> {
        Ok(Generated::template(Self::modules_for(course, count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ContentSource;
    use crate::testing::fixtures::sample_course;

    #[tokio::test]
    async fn test_ai_course_objectives() {
        let generated = TemplateGenerator::new()
            .learning_objectives(&sample_course())
            .await
            .unwrap();
        assert_eq!(generated.source, ContentSource::Template);
        assert!(generated.value.tlo.contains("AI"));
        assert!(generated.value.is_complete());
    }

    #[tokio::test]
    async fn test_modules_are_numbered_and_truncated() {
        let modules = TemplateGenerator::new()
            .modules(&sample_course(), 2)
            .await
            .unwrap()
            .value;
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].module_number, 1);
        assert_eq!(modules[0].title, "AI Fundamentals & History");
        assert_eq!(modules[1].module_number, 2);
    }

    #[test]
    fn test_module_count_never_exceeds_titles() {
        let modules = TemplateGenerator::modules_for(&sample_course(), 20);
        assert_eq!(modules.len(), crate::generation::templates::MODULE_TITLE_COUNT);
    }

    #[test]
    fn test_frameworks_complete() {
        assert!(TemplateGenerator::frameworks_for(&sample_course()).is_complete());
    }
}
