//! The external text-generation collaborator.

use crate::errors::GenerationUnavailable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request to the text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    /// System-level instructions framing the assistant's role.
    pub system_instructions: String,
    /// The user prompt describing the course.
    pub user_prompt: String,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl TextRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        system_instructions: impl Into<String>,
        user_prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            system_instructions: system_instructions.into(),
            user_prompt: user_prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

/// A service that turns a prompt into generated text.
///
/// Implementations report every failure as [`GenerationUnavailable`]; the
/// Plan stage recovers from all of them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Generates text for `request`.
    async fn generate(&self, request: &TextRequest) -> Result<String, GenerationUnavailable>;
}
