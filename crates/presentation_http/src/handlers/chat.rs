//! Chat relay handler

use application::is_conversational;
use axum::{Json, extract::State};
use domain::{ChatMessage, ModelHint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Chat relay request body
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    /// Role-tagged conversation
    #[validate(length(max = 100, message = "at most 100 messages"))]
    pub messages: Vec<ChatMessage>,
    /// Which surface the request comes from
    #[serde(default, alias = "modelHint")]
    pub model_hint: ModelHint,
}

/// Assistant reply
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant response
    pub content: String,
    /// Model used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tokens used (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    /// Latency in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl From<ChatMessage> for ChatReply {
    fn from(message: ChatMessage) -> Self {
        let metadata = message.metadata.unwrap_or_default();
        Self {
            content: message.content,
            model: metadata.model,
            tokens: metadata.tokens,
            latency_ms: metadata.latency_ms,
        }
    }
}

/// Relay a conversation to the model with the hint's system prompt
///
/// Client-supplied system messages are dropped; the server owns the prompt.
#[instrument(skip(state, request), fields(messages = request.messages.len(), hint = %request.model_hint))]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let messages: Vec<ChatMessage> = request
        .messages
        .into_iter()
        .filter(is_conversational)
        .collect();
    debug!(forwarded = messages.len(), "Relaying chat");

    let reply = state.relay.relay(&messages, request.model_hint).await?;
    Ok(Json(reply.into()))
}
