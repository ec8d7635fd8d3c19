//! Integration tests for the chat adapters
//!
//! Tests cover:
//! - Remote adapter against a mocked chat-completions API
//! - Retry of rate limits and server errors
//! - Quick reset and relay running over both adapters

use std::sync::Arc;

use ai_core::InferenceConfig;
use application::{
    ApplicationError, ChatCompletionPort, ChatRelayService, EMPTY_REPLY_FALLBACK, PlaybookEngine,
    QuickResetService,
};
use domain::{ChatMessage, Lane, ModelHint, Tone};
use infrastructure::{OFFLINE_MODEL, OfflineChatAdapter, RemoteChatAdapter, RetryConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "test-model",
        "choices": [{
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 40, "completion_tokens": 20, "total_tokens": 60}
    })
}

fn adapter_for(server: &MockServer) -> RemoteChatAdapter {
    let config = InferenceConfig {
        base_url: server.uri(),
        default_model: "test-model".to_string(),
        timeout_ms: 2000,
        ..InferenceConfig::default()
    }
    .with_api_key("sk-test");

    RemoteChatAdapter::new(config)
        .unwrap()
        .with_retry(RetryConfig::new(1, 5, 2.0, 2).without_jitter())
}

// ============================================================================
// Remote adapter
// ============================================================================

mod remote_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn complete_returns_content_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Breathe.")))
            .expect(1)
            .mount(&server)
            .await;

        let completion = adapter_for(&server)
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap();

        assert_eq!(completion.content, "Breathe.");
        assert_eq!(completion.model, "test-model");
        assert_eq!(completion.tokens_used, Some(60));
    }

    #[tokio::test]
    async fn rate_limit_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Second try.")))
            .expect(1)
            .mount(&server)
            .await;

        let completion = adapter_for(&server)
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap();

        assert_eq!(completion.content, "Second try.");
    }

    #[tokio::test]
    async fn persistent_server_error_gives_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn rejected_key_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn health_follows_models_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
            )
            .mount(&server)
            .await;

        assert!(adapter_for(&server).is_healthy().await);
    }
}

// ============================================================================
// Services over adapters
// ============================================================================

mod service_tests {
    use super::*;

    #[tokio::test]
    async fn relay_prepends_system_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "system"}, {"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hey.")))
            .expect(1)
            .mount(&server)
            .await;

        let relay = ChatRelayService::new(Arc::new(adapter_for(&server)));
        let reply = relay
            .relay(&[ChatMessage::user("hi")], ModelHint::Companion)
            .await
            .unwrap();

        assert_eq!(reply.content, "Hey.");
    }

    #[tokio::test]
    async fn relay_blank_model_reply_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("   ")))
            .mount(&server)
            .await;

        let relay = ChatRelayService::new(Arc::new(adapter_for(&server)));
        let reply = relay
            .relay(&[ChatMessage::user("hi")], ModelHint::Companion)
            .await
            .unwrap();

        assert_eq!(reply.content, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn quick_reset_attaches_normalized_reflection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "That urge to send makes sense.\n- Put the phone down.\n2) Text tomorrow instead.",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let relay = Arc::new(ChatRelayService::new(Arc::new(adapter_for(&server))));
        let service = QuickResetService::new(Arc::new(PlaybookEngine::default()), relay);
        let reset = service
            .reset("I'm about to text my ex something I'll regret", None)
            .await;

        assert_eq!(reset.playbook.lane, Some(Lane::DecisionPause));
        let reflection = reset.reflection.unwrap();
        assert_eq!(reflection.summary, "That urge to send makes sense.");
        assert_eq!(
            reflection.steps,
            vec!["Put the phone down.", "Text tomorrow instead."]
        );
    }

    #[tokio::test]
    async fn quick_reset_survives_model_outage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let relay = Arc::new(ChatRelayService::new(Arc::new(adapter_for(&server))));
        let service = QuickResetService::new(Arc::new(PlaybookEngine::default()), relay);
        let reset = service
            .reset("I feel really overwhelmed and can't handle this", Some(Tone::Direct))
            .await;

        assert_eq!(reset.playbook.lane, Some(Lane::Grounding));
        assert!(reset.playbook.steps.len() >= 2);
        assert!(reset.reflection.is_none());
    }

    #[tokio::test]
    async fn emergency_never_reaches_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let relay = Arc::new(ChatRelayService::new(Arc::new(adapter_for(&server))));
        let service = QuickResetService::new(Arc::new(PlaybookEngine::default()), relay);
        let reset = service.reset("I'm going to kill myself", None).await;

        assert_eq!(reset.playbook.lane, Some(Lane::Emergency));
        assert!(reset.reflection.is_none());
    }

    #[tokio::test]
    async fn offline_adapter_drives_quick_reset() {
        let relay = Arc::new(ChatRelayService::new(Arc::new(OfflineChatAdapter::new())));
        let service = QuickResetService::new(Arc::new(PlaybookEngine::default()), relay);
        let reset = service
            .reset("I want to buy a car I can't afford right now I'm so mad", None)
            .await;

        assert_eq!(reset.playbook.lane, Some(Lane::Money));
        let reflection = reset.reflection.unwrap();
        assert!(reflection.summary.starts_with("Here's a grounded quick reset"));
        assert!(!reflection.steps.is_empty());
    }

    #[tokio::test]
    async fn offline_relay_reports_model() {
        let relay = ChatRelayService::new(Arc::new(OfflineChatAdapter::new()));
        let reply = relay
            .relay(&[ChatMessage::user("long day")], ModelHint::Companion)
            .await
            .unwrap();

        assert_eq!(
            reply.metadata.and_then(|m| m.model).as_deref(),
            Some(OFFLINE_MODEL)
        );
    }
}
