//! Generator backed by the external text-generation service.

use super::parse::{parse_frameworks, parse_modules, parse_objectives};
use super::prompts::{frameworks_prompt, modules_prompt, objectives_prompt, SYSTEM_INSTRUCTIONS};
use super::{ContentGenerator, Generated, TextGenerationClient, TextRequest};
use crate::config::GenerationConfig;
use crate::errors::GenerationUnavailable;
use crate::model::{CourseInput, CourseModule, LearningObjectives, PedagogicalFrameworks};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Prompts the text-generation service and parses its answers.
///
/// Every call is bounded by the configured timeout, whatever the client
/// does internally.
#[derive(Clone)]
pub struct RemoteLlmGenerator {
    client: Arc<dyn TextGenerationClient>,
    config: GenerationConfig,
}

impl std::fmt::Debug for RemoteLlmGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLlmGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RemoteLlmGenerator {
    /// Creates a remote generator.
    #[must_use]
    pub fn new(client: Arc<dyn TextGenerationClient>, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    async fn complete(&self, section: &str, prompt: String, max_tokens: u32) -> Result<String, GenerationUnavailable> {
        let request = TextRequest::new(SYSTEM_INSTRUCTIONS, prompt, max_tokens, self.config.temperature);
        let start = Instant::now();

        let text = tokio::time::timeout(self.config.timeout(), self.client.generate(&request))
            .await
            .map_err(|_| GenerationUnavailable::timeout(self.config.timeout_seconds))??;

        debug!(
            section,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            response_chars = text.len(),
            "Remote generation finished"
        );
        Ok(text)
    }
}

#[async_trait]
impl ContentGenerator for RemoteLlmGenerator {
    fn name(&self) -> &str {
        "remote"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn learning_objectives(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<LearningObjectives>, GenerationUnavailable> {
        let text = self
            .complete("objectives", objectives_prompt(course), self.config.max_tokens)
            .await?;
        Ok(Generated::remote(parse_objectives(&text)?))
    }

    async fn frameworks(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<PedagogicalFrameworks>, GenerationUnavailable> {
        let text = self
            .complete("frameworks", frameworks_prompt(course), self.config.frameworks_max_tokens)
            .await?;
        Ok(Generated::remote(parse_frameworks(&text)?))
    }

    async fn modules(
        &self,
        course: &CourseInput,
        count: usize,
    ) -> Result<Generated<Vec<CourseModule>>, GenerationUnavailable> {
        let text = self
            .complete("modules", modules_prompt(course, count), self.config.modules_max_tokens)
            .await?;
        Ok(Generated::remote(parse_modules(&text, count)?))
    }
}
