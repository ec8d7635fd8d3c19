//! Offline chat adapter
//!
//! Deterministic stand-in for the model, used when no API key is configured.
//! The reply opens with a line chosen by the model hint (recognised from the
//! system prompt the relay prepends) and reflects the latest user message.

use application::{
    error::ApplicationError,
    ports::{ChatCompletion, ChatCompletionPort},
    system_prompt,
};
use async_trait::async_trait;
use domain::{ChatMessage, MessageRole, ModelHint};
use tracing::debug;

/// Model name reported for offline replies
pub const OFFLINE_MODEL: &str = "innernode-offline";

/// Longest user excerpt quoted back, in characters
const MAX_ECHO_CHARS: usize = 280;

/// Local chat-completion stand-in
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineChatAdapter;

impl OfflineChatAdapter {
    /// Create the adapter
    pub const fn new() -> Self {
        Self
    }

    /// Hint whose system prompt leads the conversation
    fn detect_hint(messages: &[ChatMessage]) -> ModelHint {
        let Some(system) = messages.iter().find(|m| m.role == MessageRole::System) else {
            return ModelHint::Companion;
        };
        [ModelHint::QuickReset, ModelHint::Lesson, ModelHint::Companion]
            .into_iter()
            .find(|hint| system.content.trim() == system_prompt(*hint).trim())
            .unwrap_or_default()
    }

    fn prefix(hint: ModelHint) -> &'static str {
        match hint {
            ModelHint::QuickReset => {
                "Here's a grounded quick reset reflection based on what you shared:"
            },
            ModelHint::Lesson => "Here's a simple, real-world reflection to go with this lesson:",
            ModelHint::Companion => "I'm taking in what you just shared.",
        }
    }

    fn excerpt(text: &str) -> String {
        if text.chars().count() <= MAX_ECHO_CHARS {
            return text.to_string();
        }
        let cut: String = text.chars().take(MAX_ECHO_CHARS).collect();
        format!("{}...", cut.trim_end())
    }

    /// Build the full reply for a conversation
    pub fn reply_for(messages: &[ChatMessage]) -> String {
        let hint = Self::detect_hint(messages);
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.trim())
            .unwrap_or_default();

        let body = if last_user.is_empty() {
            "If you want, say a bit more about what's going on so I can respond more specifically. \
             You could start with \"Right now I feel...\" or \"The part that hurts the most is...\""
                .to_string()
        } else {
            format!(
                "I hear you saying: \"{}\"\n\
                 You're not overreacting for feeling this way. Let's keep it practical:\n\
                 1. Take one slow breath and notice which part of this feels heaviest right now.\n\
                 2. Name one tiny move that would make today 2% easier. Lighter, not perfect.\n\
                 3. If you texted a trusted friend about this in one sentence, what would you say?",
                Self::excerpt(last_user)
            )
        };

        format!("{}\n{body}", Self::prefix(hint))
    }
}

#[async_trait]
impl ChatCompletionPort for OfflineChatAdapter {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, ApplicationError> {
        debug!(messages = messages.len(), "Generating offline reply");
        Ok(ChatCompletion {
            content: Self::reply_for(messages),
            model: OFFLINE_MODEL.to_string(),
            tokens_used: None,
            latency_ms: 0,
        })
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    fn current_model(&self) -> String {
        OFFLINE_MODEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(hint: ModelHint, user: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(system_prompt(hint)),
            ChatMessage::user(user),
        ]
    }

    #[test]
    fn detects_hint_from_system_prompt() {
        for hint in [ModelHint::QuickReset, ModelHint::Lesson, ModelHint::Companion] {
            assert_eq!(
                OfflineChatAdapter::detect_hint(&conversation(hint, "hi")),
                hint
            );
        }
    }

    #[test]
    fn unknown_system_prompt_is_companion() {
        let messages = vec![ChatMessage::system("be nice"), ChatMessage::user("hi")];
        assert_eq!(
            OfflineChatAdapter::detect_hint(&messages),
            ModelHint::Companion
        );
    }

    #[test]
    fn quick_reset_reply_quotes_user() {
        let reply = OfflineChatAdapter::reply_for(&conversation(
            ModelHint::QuickReset,
            "  I want to quit right now  ",
        ));
        assert!(reply.starts_with("Here's a grounded quick reset reflection"));
        assert!(reply.contains("\"I want to quit right now\""));
        assert!(reply.contains("1. Take one slow breath"));
    }

    #[test]
    fn quotes_latest_user_message() {
        let messages = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("ok"),
            ChatMessage::user("second"),
        ];
        let reply = OfflineChatAdapter::reply_for(&messages);
        assert!(reply.starts_with("I'm taking in what you just shared."));
        assert!(reply.contains("\"second\""));
        assert!(!reply.contains("\"first\""));
    }

    #[test]
    fn no_user_text_asks_for_more() {
        let reply = OfflineChatAdapter::reply_for(&[ChatMessage::system(system_prompt(
            ModelHint::Lesson,
        ))]);
        assert!(reply.starts_with("Here's a simple, real-world reflection"));
        assert!(reply.contains("Right now I feel"));
    }

    #[test]
    fn long_text_is_truncated() {
        let long = "a".repeat(1000);
        let reply = OfflineChatAdapter::reply_for(&[ChatMessage::user(long)]);
        assert!(reply.contains(&format!("{}...", "a".repeat(MAX_ECHO_CHARS))));
        assert!(!reply.contains(&"a".repeat(MAX_ECHO_CHARS + 1)));
    }

    #[tokio::test]
    async fn complete_is_deterministic() {
        let adapter = OfflineChatAdapter::new();
        let messages = conversation(ModelHint::Companion, "rough day");
        let first = adapter.complete(&messages).await.unwrap();
        let second = adapter.complete(&messages).await.unwrap();
        assert_eq!(first.content, second.content);
        assert_eq!(first.model, OFFLINE_MODEL);
        assert!(adapter.is_healthy().await);
    }
}
