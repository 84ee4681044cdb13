//! Content generation for the Plan stage.
//!
//! Two interchangeable strategies implement [`ContentGenerator`]:
//!
//! - [`TemplateGenerator`]: deterministic keyword-selected templates
//! - [`RemoteLlmGenerator`]: prompts an external [`TextGenerationClient`]
//!
//! [`FallbackGenerator`] combines them so that a remote failure is never
//! fatal: every [`GenerationUnavailable`] from the primary is absorbed and
//! the section is produced by the fallback instead.

mod client;
mod fallback;
#[cfg(feature = "remote")]
mod openai;
mod parse;
mod prompts;
mod remote;
mod template;
pub mod templates;

pub use client::{TextGenerationClient, TextRequest};
#[cfg(test)]
pub use client::MockTextGenerationClient;
pub use fallback::FallbackGenerator;
#[cfg(feature = "remote")]
pub use openai::OpenAiCompatibleClient;
pub use parse::{parse_frameworks, parse_modules, parse_objectives};
pub use prompts::SYSTEM_INSTRUCTIONS;
pub use remote::RemoteLlmGenerator;
pub use template::TemplateGenerator;

use crate::config::GenerationConfig;
use crate::errors::GenerationUnavailable;
use crate::model::{CourseInput, CourseModule, LearningObjectives, PedagogicalFrameworks};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Where a generated section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Deterministic templates.
    Template,
    /// The external text-generation service.
    Remote,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// A generated section together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    /// The generated value.
    pub value: T,
    /// Which strategy produced it.
    pub source: ContentSource,
    /// Why the primary strategy was bypassed, if it was.
    pub fallback_reason: Option<String>,
}

impl<T> Generated<T> {
    /// Wraps a template-produced value.
    pub fn template(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Template,
            fallback_reason: None,
        }
    }

    /// Wraps a remotely produced value.
    pub fn remote(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Remote,
            fallback_reason: None,
        }
    }

    /// Records that this value replaced a failed primary attempt.
    #[must_use]
    pub fn with_fallback_reason(mut self, reason: impl Into<String>) -> Self {
        self.fallback_reason = Some(reason.into());
        self
    }

    /// Returns true if the value came from a fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Produces the three generated sections of a course plan.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the generator name for logs.
    fn name(&self) -> &str;

    /// Returns true if this generator may call the remote service.
    fn is_remote(&self) -> bool;

    /// Generates the terminal and enabling learning objectives.
    async fn learning_objectives(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<LearningObjectives>, GenerationUnavailable>;

    /// Generates the KDKA and PRRR mappings.
    async fn frameworks(
        &self,
        course: &CourseInput,
    ) -> Result<Generated<PedagogicalFrameworks>, GenerationUnavailable>;

    /// Generates exactly `count` modules, numbered from 1.
    async fn modules(
        &self,
        course: &CourseInput,
        count: usize,
    ) -> Result<Generated<Vec<CourseModule>>, GenerationUnavailable>;
}

/// Builds the generator selected by `config`.
///
/// Remote generation is always wrapped in a template fallback. Without the
/// `remote` feature the remote client is unavailable and the template
/// generator is returned.
#[must_use]
pub fn build_generator(config: &GenerationConfig) -> Arc<dyn ContentGenerator> {
    if !config.wants_remote() {
        return Arc::new(TemplateGenerator::new());
    }
    build_remote(config)
}

#[cfg(feature = "remote")]
fn build_remote(config: &GenerationConfig) -> Arc<dyn ContentGenerator> {
    match OpenAiCompatibleClient::new(config) {
        Ok(client) => with_template_fallback(Arc::new(client), config),
        Err(err) => {
            tracing::warn!(error = %err, "Remote client unavailable, using templates");
            Arc::new(TemplateGenerator::new())
        }
    }
}

#[cfg(not(feature = "remote"))]
fn build_remote(_config: &GenerationConfig) -> Arc<dyn ContentGenerator> {
    tracing::warn!("Remote generation requested but the `remote` feature is disabled");
    Arc::new(TemplateGenerator::new())
}

/// Wraps `client` in a remote generator with a template fallback.
#[must_use]
pub fn with_template_fallback(
    client: Arc<dyn TextGenerationClient>,
    config: &GenerationConfig,
) -> Arc<dyn ContentGenerator> {
    Arc::new(FallbackGenerator::new(
        Arc::new(RemoteLlmGenerator::new(client, config.clone())),
        Arc::new(TemplateGenerator::new()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationMode;

    #[test]
    fn test_template_mode_builds_template_generator() {
        let config = GenerationConfig::new()
            .with_mode(GenerationMode::Template)
            .with_api_key("sk-test");
        let generator = build_generator(&config);
        assert!(!generator.is_remote());
        assert_eq!(generator.name(), "template");
    }

    #[test]
    fn test_auto_without_key_builds_template_generator() {
        let generator = build_generator(&GenerationConfig::default());
        assert!(!generator.is_remote());
    }

    #[test]
    fn test_generated_provenance() {
        let generated = Generated::remote(1).with_fallback_reason("timeout");
        assert!(generated.is_fallback());
        assert_eq!(generated.source, ContentSource::Remote);
        assert_eq!(ContentSource::Template.to_string(), "template");
    }
}
