//! Test doubles for text generation and stages.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::context::StageContext;
use crate::core::{StageId, StageOutput};
use crate::errors::{GenerationFailureKind, GenerationUnavailable, HaileiError};
use crate::generation::{TextGenerationClient, TextRequest};
use crate::stages::Stage;

/// A text client that answers with pre-scripted responses, in order.
///
/// Once the script is exhausted every call fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTextClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<TextRequest>>,
}

impl ScriptedTextClient {
    /// Creates a client with the given responses.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TextGenerationClient for ScriptedTextClient {
    async fn generate(&self, request: &TextRequest) -> Result<String, GenerationUnavailable> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| GenerationUnavailable::transport("script exhausted"))
    }
}

/// A text client that always fails with the configured kind.
#[derive(Debug)]
pub struct FailingTextClient {
    kind: GenerationFailureKind,
    calls: AtomicUsize,
}

impl FailingTextClient {
    /// Creates a failing client.
    #[must_use]
    pub fn new(kind: GenerationFailureKind) -> Self {
        Self {
            kind,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the number of calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationClient for FailingTextClient {
    async fn generate(&self, _request: &TextRequest) -> Result<String, GenerationUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationUnavailable::new(self.kind, "forced failure"))
    }
}

/// A text client that sleeps before answering, for timeout tests.
#[derive(Debug, Clone)]
pub struct SlowTextClient {
    delay: Duration,
    response: String,
}

impl SlowTextClient {
    /// Creates a slow client with an objectives-shaped answer.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            response: "TLO: Slow objective\nELOs:\n• Slow skill".to_string(),
        }
    }
}

#[async_trait]
impl TextGenerationClient for SlowTextClient {
    async fn generate(&self, _request: &TextRequest) -> Result<String, GenerationUnavailable> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }
}

/// Wraps a stage and counts its invocations.
#[derive(Debug)]
pub struct CountingStage {
    inner: Arc<dyn Stage>,
    calls: Arc<AtomicUsize>,
}

impl CountingStage {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn Stage>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a handle to the invocation counter.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Stage for CountingStage {
    fn id(&self) -> StageId {
        self.inner.id()
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(ctx).await
    }
}

/// A stage that always returns an error-status output.
#[derive(Debug, Clone)]
pub struct ErrorStatusStage {
    id: StageId,
    reason: String,
}

impl ErrorStatusStage {
    /// Creates a stage that refuses every input with `reason`.
    #[must_use]
    pub fn new(id: StageId, reason: impl Into<String>) -> Self {
        Self {
            id,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Stage for ErrorStatusStage {
    fn id(&self) -> StageId {
        self.id
    }

    async fn execute(&self, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        Ok(StageOutput::error(self.id, ctx.course_title(), self.reason.clone()))
    }
}

/// A stage that always fails with an unexpected error.
#[derive(Debug, Clone)]
pub struct FailingStage {
    id: StageId,
    message: String,
}

impl FailingStage {
    /// Creates a stage that fails with `message`.
    #[must_use]
    pub fn new(id: StageId, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Stage for FailingStage {
    fn id(&self) -> StageId {
        self.id
    }

    async fn execute(&self, _ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        Err(HaileiError::Serialization(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_client_order() {
        let client = ScriptedTextClient::new(["first", "second"]);
        let request = TextRequest::new("s", "u", 1, 0.0);

        assert_eq!(client.generate(&request).await.unwrap(), "first");
        assert_eq!(client.generate(&request).await.unwrap(), "second");
        assert!(client.generate(&request).await.is_err());
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_client_counts() {
        let client = FailingTextClient::new(GenerationFailureKind::Unparseable);
        let err = client.generate(&TextRequest::new("s", "u", 1, 0.0)).await.unwrap_err();
        assert_eq!(err.kind, GenerationFailureKind::Unparseable);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_stage_error() {
        let stage = FailingStage::new(StageId::Review, "boom");
        let ctx = StageContext::new(StageId::Review, serde_json::Map::new());
        let err = stage.execute(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
