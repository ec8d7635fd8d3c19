//! Application services - Use case implementations

mod chat_relay_service;
mod companion_service;
mod playbook_engine;
mod quick_reset_service;
mod reply_normalizer;
mod reset_prompt;
mod script_table;
mod system_prompts;
mod trigger_classifier;

pub use chat_relay_service::{ChatRelayService, EMPTY_REPLY_FALLBACK, is_conversational};
pub use companion_service::{CHECK_IN_OPENER, CompanionService, MAX_HISTORY, prepare_history};
pub use playbook_engine::{
    PlaybookEngine, ToneResolution, emergency_triad, escalation_suggested, fallback_steps,
    resolve_tone, run_playbook, safety_note, select_lane,
};
pub use quick_reset_service::{EnrichedReset, QuickResetService};
pub use reply_normalizer::{ModelReflection, normalize_reply};
pub use reset_prompt::{build_reset_messages, reset_prompt};
pub use script_table::{EmotionOpeners, LaneScript, LaneScripts, ScriptTable, ToneLines};
pub use system_prompts::system_prompt;
pub use trigger_classifier::{ClassificationTrace, TriggerClassifier, classify};
