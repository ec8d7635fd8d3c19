//! Chat relay service
//!
//! Forwards role-tagged messages to the chat completion backend with the
//! system prompt for the requesting surface prepended.

use std::{fmt, sync::Arc, time::Instant};

use domain::{ChatMessage, MessageMetadata, MessageRole, ModelHint};
use tracing::{debug, instrument, warn};

use super::system_prompts::system_prompt;
use crate::{
    error::ApplicationError,
    ports::{ChatCompletion, ChatCompletionPort},
};

/// Returned when the model answers with nothing
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm here with you. Something glitched on my side, so try again in a moment.";

/// Service relaying chat requests to the model
pub struct ChatRelayService {
    completion: Arc<dyn ChatCompletionPort>,
}

impl fmt::Debug for ChatRelayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRelayService")
            .field("model", &self.completion.current_model())
            .finish_non_exhaustive()
    }
}

impl ChatRelayService {
    /// Create a new relay
    pub fn new(completion: Arc<dyn ChatCompletionPort>) -> Self {
        Self { completion }
    }

    /// Ask the model and return its trimmed answer, or `None` when it said nothing
    #[instrument(skip(self, messages), fields(hint = %hint, message_count = messages.len()))]
    pub async fn ask(
        &self,
        messages: &[ChatMessage],
        hint: ModelHint,
    ) -> Result<Option<ChatCompletion>, ApplicationError> {
        if messages.is_empty() {
            return Err(ApplicationError::Validation(
                "messages must not be empty".to_string(),
            ));
        }

        let mut request = Vec::with_capacity(messages.len() + 1);
        request.push(ChatMessage::system(system_prompt(hint)));
        request.extend_from_slice(messages);

        let mut completion = self.completion.complete(&request).await?;

        debug!(
            model = %completion.model,
            tokens = ?completion.tokens_used,
            latency_ms = completion.latency_ms,
            "Chat completion received"
        );

        if completion.is_blank() {
            warn!(model = %completion.model, "Model returned an empty reply");
            return Ok(None);
        }

        completion.content = completion.content.trim().to_string();
        Ok(Some(completion))
    }

    /// Relay a conversation and return the assistant message
    ///
    /// An empty model reply becomes [`EMPTY_REPLY_FALLBACK`].
    pub async fn relay(
        &self,
        messages: &[ChatMessage],
        hint: ModelHint,
    ) -> Result<ChatMessage, ApplicationError> {
        let start = Instant::now();
        let reply = self.ask(messages, hint).await?;
        let latency = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let message = match reply {
            Some(completion) => {
                ChatMessage::assistant(completion.content).with_metadata(MessageMetadata {
                    model: Some(completion.model),
                    tokens: completion.tokens_used,
                    latency_ms: Some(latency),
                })
            },
            None => ChatMessage::assistant(EMPTY_REPLY_FALLBACK),
        };

        Ok(message)
    }

    /// Check if the backend is healthy
    pub async fn is_healthy(&self) -> bool {
        self.completion.is_healthy().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.completion.current_model()
    }
}

/// Whether a message is one the relay forwards from a client
pub fn is_conversational(message: &ChatMessage) -> bool {
    matches!(message.role, MessageRole::User | MessageRole::Assistant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockChatCompletionPort;

    fn completion(content: &str) -> ChatCompletion {
        ChatCompletion {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(42),
            latency_ms: 100,
        }
    }

    #[tokio::test]
    async fn prepends_system_prompt_for_hint() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_complete()
            .withf(|messages| {
                messages.len() == 2
                    && messages[0].role == MessageRole::System
                    && messages[0].content == system_prompt(ModelHint::Lesson)
                    && messages[1].content == "What does this lesson mean for me?"
            })
            .returning(|_| Ok(completion("  Here's a thought.  ")));

        let service = ChatRelayService::new(Arc::new(mock));
        let reply = service
            .relay(
                &[ChatMessage::user("What does this lesson mean for me?")],
                ModelHint::Lesson,
            )
            .await
            .unwrap();

        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.content, "Here's a thought.");
        let metadata = reply.metadata.unwrap();
        assert_eq!(metadata.model.as_deref(), Some("test-model"));
        assert_eq!(metadata.tokens, Some(42));
    }

    #[tokio::test]
    async fn rejects_empty_message_list() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_complete().never();

        let service = ChatRelayService::new(Arc::new(mock));
        let result = service.relay(&[], ModelHint::Companion).await;

        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[tokio::test]
    async fn blank_reply_becomes_apology() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_complete().returning(|_| Ok(completion("   \n ")));

        let service = ChatRelayService::new(Arc::new(mock));
        let reply = service
            .relay(&[ChatMessage::user("hi")], ModelHint::Companion)
            .await
            .unwrap();

        assert_eq!(reply.content, EMPTY_REPLY_FALLBACK);
        assert!(reply.metadata.is_none());
    }

    #[tokio::test]
    async fn ask_returns_none_for_blank_reply() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_complete().returning(|_| Ok(completion("")));

        let service = ChatRelayService::new(Arc::new(mock));
        let reply = service
            .ask(&[ChatMessage::user("hi")], ModelHint::QuickReset)
            .await
            .unwrap();

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn propagates_backend_errors() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_complete()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".to_string())));

        let service = ChatRelayService::new(Arc::new(mock));
        let result = service
            .relay(&[ChatMessage::user("hi")], ModelHint::Companion)
            .await;

        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }

    #[tokio::test]
    async fn health_and_model_delegate() {
        let mut mock = MockChatCompletionPort::new();
        mock.expect_is_healthy().returning(|| true);
        mock.expect_current_model()
            .returning(|| "gpt-4.1-mini".to_string());

        let service = ChatRelayService::new(Arc::new(mock));
        assert!(service.is_healthy().await);
        assert_eq!(service.current_model(), "gpt-4.1-mini");
    }

    #[test]
    fn system_messages_are_not_conversational() {
        assert!(is_conversational(&ChatMessage::user("a")));
        assert!(is_conversational(&ChatMessage::assistant("b")));
        assert!(!is_conversational(&ChatMessage::system("c")));
    }
}
