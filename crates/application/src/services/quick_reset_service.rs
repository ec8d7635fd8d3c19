//! Quick reset service
//!
//! Runs the playbook for a triggered moment and, when it is safe to do so,
//! attaches a short model reflection. Emergency results never reach the
//! model, and a failing model only costs the reflection.

use std::sync::Arc;

use domain::{ModelHint, PlaybookResult, Tone};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::chat_relay_service::ChatRelayService;
use super::playbook_engine::PlaybookEngine;
use super::reply_normalizer::{ModelReflection, normalize_reply};
use super::reset_prompt::build_reset_messages;

/// Playbook plus optional model reflection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedReset {
    /// Deterministic script output
    pub playbook: PlaybookResult,
    /// Model reflection, when the model was asked and answered
    ///
    /// A blank reply becomes the fallback summary and pause steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<ModelReflection>,
}

/// Service combining the playbook engine with the model
#[derive(Debug, Clone)]
pub struct QuickResetService {
    engine: Arc<PlaybookEngine>,
    relay: Arc<ChatRelayService>,
}

impl QuickResetService {
    /// Create a new quick reset service
    pub fn new(engine: Arc<PlaybookEngine>, relay: Arc<ChatRelayService>) -> Self {
        Self { engine, relay }
    }

    /// Playbook engine in use
    pub fn engine(&self) -> &PlaybookEngine {
        &self.engine
    }

    /// Run a quick reset
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn reset(&self, text: &str, tone: Option<Tone>) -> EnrichedReset {
        let playbook = self.engine.run(text, tone);

        if playbook.is_prompt_for_more() {
            debug!("Blank input, skipping model reflection");
            return EnrichedReset {
                playbook,
                reflection: None,
            };
        }
        if playbook.classification.is_emergency() {
            debug!("Emergency lane, keeping safety content deterministic");
            return EnrichedReset {
                playbook,
                reflection: None,
            };
        }

        let messages =
            build_reset_messages(text, &playbook.classification, playbook.lane, playbook.tone);

        let reflection = match self.relay.ask(&messages, ModelHint::QuickReset).await {
            Ok(Some(completion)) => Some(normalize_reply(&completion.content)),
            Ok(None) => Some(normalize_reply("")),
            Err(e) => {
                warn!(error = %e, "Model reflection failed, returning script only");
                None
            },
        };

        EnrichedReset {
            playbook,
            reflection,
        }
    }
}
