//! Companion chat handler

use axum::{Json, extract::State};
use domain::ChatMessage;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use super::chat::ChatReply;
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Companion request body
#[derive(Debug, Deserialize, Validate)]
pub struct CompanionRequest {
    /// Conversation so far; may be empty for a check-in
    #[serde(default)]
    #[validate(length(max = 200, message = "at most 200 messages"))]
    pub messages: Vec<ChatMessage>,
}

/// Reply as the companion
///
/// Only the most recent turns are sent to the model. An empty history gets a
/// check-in reply.
#[instrument(skip(state, request), fields(messages = request.messages.len()))]
pub async fn companion(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CompanionRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state.companion.reply(&request.messages).await?;
    Ok(Json(reply.into()))
}
