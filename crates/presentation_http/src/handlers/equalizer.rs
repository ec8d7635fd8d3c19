//! Equalizer handlers: classify, playbook and quick reset

use application::{EnrichedReset, TriggerClassifier};
use axum::{Json, extract::State};
use domain::{PlaybookResult, Tone, TriggerClassification};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Free text plus an optional tone
#[derive(Debug, Deserialize, Validate)]
pub struct TextRequest {
    /// What the user wrote; may be blank
    #[serde(default)]
    #[validate(length(max = 4000, message = "must be at most 4000 characters"))]
    pub text: String,
    /// gentle | direct | playful | firm
    #[serde(default)]
    pub tone: Option<String>,
}

impl TextRequest {
    /// Requested tone, or the configured default
    fn resolve_tone(&self, default: Tone) -> Result<Tone, ApiError> {
        match self.tone.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(name) => Ok(name.parse::<Tone>()?),
            None => Ok(default),
        }
    }
}

/// Classification response
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub classification: TriggerClassification,
    /// Trigger phrases that matched, in text order
    pub matched_terms: Vec<String>,
}

/// Classify free text
#[instrument(skip(request), fields(text_len = request.text.len()))]
pub async fn classify(
    ValidatedJson(request): ValidatedJson<TextRequest>,
) -> Json<ClassifyResponse> {
    let (classification, trace) = TriggerClassifier::new().classify_with_trace(&request.text);

    Json(ClassifyResponse {
        classification,
        matched_terms: trace
            .matched_terms
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Run the deterministic playbook
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn playbook(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TextRequest>,
) -> Result<Json<PlaybookResult>, ApiError> {
    let tone = request.resolve_tone(state.config.playbook.default_tone)?;
    let result = state.engine.run(&request.text, Some(tone));

    if result.escalation_suggested {
        info!(lane = ?result.lane, level = %result.classification.escalation_level, "Escalation suggested");
    }

    Ok(Json(result))
}

/// Run the playbook and attach a model reflection when safe
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn reset(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TextRequest>,
) -> Result<Json<EnrichedReset>, ApiError> {
    let tone = request.resolve_tone(state.config.playbook.default_tone)?;
    Ok(Json(state.quick_reset.reset(&request.text, Some(tone)).await))
}
