//! Application state shared across handlers

use std::sync::Arc;

use application::{
    ChatCompletionPort, ChatRelayService, CompanionService, PlaybookEngine, QuickResetService,
    ScriptTable,
};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Deterministic classifier and script engine
    pub engine: Arc<PlaybookEngine>,
    /// Relay to the chat-completion backend
    pub relay: Arc<ChatRelayService>,
    /// Companion chat
    pub companion: Arc<CompanionService>,
    /// Playbook plus model reflection
    pub quick_reset: Arc<QuickResetService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the services around a chat backend and a script table
    pub fn new(
        completion: Arc<dyn ChatCompletionPort>,
        scripts: ScriptTable,
        config: AppConfig,
    ) -> Self {
        let engine = Arc::new(PlaybookEngine::new(scripts));
        let relay = Arc::new(ChatRelayService::new(completion));
        let companion = Arc::new(CompanionService::new(Arc::clone(&relay)));
        let quick_reset = Arc::new(QuickResetService::new(
            Arc::clone(&engine),
            Arc::clone(&relay),
        ));

        Self {
            engine,
            relay,
            companion,
            quick_reset,
            config: Arc::new(config),
        }
    }
}
