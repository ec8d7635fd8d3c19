//! Remote chat adapter - Implements ChatCompletionPort using ai_core
//!
//! Sends the prepared messages to an OpenAI-compatible chat-completions
//! endpoint. Rate limits and transport failures are retried with backoff.

use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceError, InferenceRequest, OpenAiChatEngine};
use application::{
    error::ApplicationError,
    ports::{ChatCompletion, ChatCompletionPort},
};
use async_trait::async_trait;
use domain::ChatMessage;
use tracing::{debug, info, instrument};

use crate::retry::{RetryConfig, retry};

/// Adapter for OpenAI-compatible chat-completion servers
#[derive(Debug)]
pub struct RemoteChatAdapter {
    engine: OpenAiChatEngine,
    retry: RetryConfig,
}

impl RemoteChatAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiChatEngine::new(config).map_err(Self::map_error)?;

        Ok(Self {
            engine,
            retry: RetryConfig::default(),
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Model connection failed: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Model timeout after {ms}ms"))
            },
            InferenceError::ServerError(msg) => {
                ApplicationError::ExternalService(format!("Model server error: {msg}"))
            },
            InferenceError::Unauthorized(msg) => {
                ApplicationError::Configuration(format!("Model API key rejected: {msg}"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl ChatCompletionPort for RemoteChatAdapter {
    #[instrument(skip(self, messages), fields(messages = messages.len(), model = %self.engine.default_model()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, ApplicationError> {
        let start = Instant::now();
        let request = InferenceRequest::from_messages(messages);

        let response = retry(&self.retry, || self.engine.generate(request.clone()))
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        info!(
            model = %response.model,
            latency_ms = latency_ms,
            tokens = ?response.usage.map(|u| u.total_tokens),
            "Chat completion received"
        );

        Ok(ChatCompletion {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                debug!(error = %e, "Model health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
