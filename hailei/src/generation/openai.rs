//! Chat-completions client for OpenAI-compatible endpoints.

use super::{TextGenerationClient, TextRequest};
use crate::config::GenerationConfig;
use crate::errors::{GenerationUnavailable, HaileiError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sends [`TextRequest`]s to `{base_url}/chat/completions`.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout_seconds: f64,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleClient {
    /// Builds a client from the generation settings.
    pub fn new(config: &GenerationConfig) -> Result<Self, HaileiError> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HaileiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_seconds: config.timeout_seconds,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn request_completion(&self, api_key: &str, request: &TextRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_instructions.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send chat-completions request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("chat-completions API error ({status}): {error_text}");
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat-completions response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .context("chat-completions response had no content")
    }

    fn classify(&self, err: &anyhow::Error) -> GenerationUnavailable {
        let timed_out = err
            .chain()
            .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
            .any(reqwest::Error::is_timeout);
        if timed_out {
            GenerationUnavailable::timeout(self.timeout_seconds)
        } else {
            GenerationUnavailable::transport(format!("{err:#}"))
        }
    }
}

#[async_trait]
impl TextGenerationClient for OpenAiCompatibleClient {
    async fn generate(&self, request: &TextRequest) -> Result<String, GenerationUnavailable> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationUnavailable::not_configured("no API key configured"));
        };
        self.request_completion(api_key, request)
            .await
            .map_err(|err| self.classify(&err))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerationFailureKind;

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = OpenAiCompatibleClient::new(&GenerationConfig::default()).unwrap();
        let request = TextRequest::new("system", "user", 10, 0.7);

        let err = client.generate(&request).await.unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::NotConfigured);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let config = GenerationConfig::new()
            .with_api_key("sk-test")
            .with_base_url("http://127.0.0.1:9/v1")
            .with_timeout(2.0);
        let client = OpenAiCompatibleClient::new(&config).unwrap();
        let request = TextRequest::new("system", "user", 10, 0.7);

        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(
            err.kind,
            GenerationFailureKind::Transport | GenerationFailureKind::Timeout
        ));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let config = GenerationConfig::new()
            .with_api_key("sk-test")
            .with_timeout(f64::INFINITY);
        let err = OpenAiCompatibleClient::new(&config).unwrap_err();
        assert!(matches!(err, HaileiError::Config(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = GenerationConfig::new().with_api_key("sk-secret");
        let client = OpenAiCompatibleClient::new(&config).unwrap();
        assert!(!format!("{client:?}").contains("sk-secret"));
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            max_tokens: Some(600),
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 600);
        assert!(json.get("temperature").is_none());
    }
}
