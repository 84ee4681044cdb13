//! Fallback combinator over two generators.

use super::{ContentGenerator, Generated};
use crate::errors::GenerationUnavailable;
use crate::model::{CourseInput, CourseModule, LearningObjectives, PedagogicalFrameworks};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Tries `primary` for each section and uses `fallback` when it fails.
///
/// Sections fall back independently: a failed module list does not discard
/// remotely generated objectives.
#[derive(Clone)]
pub struct FallbackGenerator {
    primary: Arc<dyn ContentGenerator>,
    fallback: Arc<dyn ContentGenerator>,
}

impl std::fmt::Debug for FallbackGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackGenerator")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl FallbackGenerator {
    /// Creates a fallback combinator.
    #[must_use]
    pub fn new(primary: Arc<dyn ContentGenerator>, fallback: Arc<dyn ContentGenerator>) -> Self {
        Self { primary, fallback }
    }

    fn absorb(&self, section: &str, err: &GenerationUnavailable) -> String {
        warn!(
            section,
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            kind = %err.kind,
            error = %err,
            "Generation failed, falling back"
        );
        err.to_string()
    }
}

#[async_trait]
impl ContentGenerator for FallbackGenerator {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn is_remote(&self) -> bool {
        self.primary.is_remote() || self.fallback.is_remote()
    }

    async fn learning_objectives(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<LearningObjectives>, GenerationUnavailable> {
        match self.primary.learning_objectives(course).await {
            Ok(generated) => Ok(generated),
            Err(err) => {
                let reason = self.absorb("objectives", &err);
                Ok(self
                    .fallback
                    .learning_objectives(course)
                    .await?
                    .with_fallback_reason(reason))
            }
        }
    }

    async fn frameworks(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<PedagogicalFrameworks>, GenerationUnavailable> {
        match self.primary.frameworks(course).await {
            Ok(generated) => Ok(generated),
            Err(err) => {
                let reason = self.absorb("frameworks", &err);
                Ok(self.fallback.frameworks(course).await?.with_fallback_reason(reason))
            }
        }
    }

    async fn modules(
        &self,
        course: &CourseInput,
        count: usize,
    ) -> Result<Generated<Vec<CourseModule>>, GenerationUnavailable> {
        match self.primary.modules(course, count).await {
            Ok(generated) => Ok(generated),
            Err(err) => {
                let reason = self.absorb("modules", &err);
                Ok(self
                    .fallback
                    .modules(course, count)
                    .await?
                    .with_fallback_reason(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::errors::GenerationFailureKind;
    use crate::generation::{ContentSource, RemoteLlmGenerator, TemplateGenerator};
    use crate::testing::fixtures::sample_course;
    use crate::testing::mocks::{FailingTextClient, ScriptedTextClient};

    fn over(client: Arc<dyn crate::generation::TextGenerationClient>) -> FallbackGenerator {
        FallbackGenerator::new(
            Arc::new(RemoteLlmGenerator::new(client, GenerationConfig::new())),
            Arc::new(TemplateGenerator::new()),
        )
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_templates() {
        let generator = over(Arc::new(FailingTextClient::new(GenerationFailureKind::Timeout)));
        let course = sample_course();

        let objectives = generator.learning_objectives(&course).await.unwrap();
        assert_eq!(objectives.source, ContentSource::Template);
        assert!(objectives.is_fallback());
        assert!(objectives.value.is_complete());

        let modules = generator.modules(&course, 2).await.unwrap();
        assert_eq!(modules.value.len(), 2);
        assert!(modules.fallback_reason.unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_sections_fall_back_independently() {
        let client = ScriptedTextClient::new([
            "TLO: Remote objective\nELOs:\n• Remote skill",
            "no json here",
        ]);
        let generator = over(Arc::new(client));
        let course = sample_course();

        let objectives = generator.learning_objectives(&course).await.unwrap();
        assert_eq!(objectives.source, ContentSource::Remote);
        assert_eq!(objectives.value.tlo, "Remote objective");

        let frameworks = generator.frameworks(&course).await.unwrap();
        assert_eq!(frameworks.source, ContentSource::Template);
        assert!(frameworks.is_fallback());
    }

    #[test]
    fn test_is_remote_when_primary_is() {
        let generator = over(Arc::new(FailingTextClient::new(GenerationFailureKind::Transport)));
        assert!(generator.is_remote());
        assert_eq!(generator.name(), "remote");
    }
}
