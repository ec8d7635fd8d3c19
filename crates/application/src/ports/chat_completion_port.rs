//! Chat completion port - Interface for the language model behind the
//! companion, quick reset and chat relay

use async_trait::async_trait;
use domain::ChatMessage;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a chat completion call
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

impl ChatCompletion {
    /// Whether the model returned nothing usable
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Port for chat completion operations
///
/// Messages are passed in order and may include a leading system message.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    /// Complete a conversation
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, ApplicationError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Name of the model requests are sent to
    fn current_model(&self) -> String;
}
