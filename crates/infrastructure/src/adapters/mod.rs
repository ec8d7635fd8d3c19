//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod offline_chat_adapter;
mod remote_chat_adapter;

use std::sync::Arc;

use ai_core::InferenceConfig;
use application::{ApplicationError, ports::ChatCompletionPort};
use tracing::{info, warn};

use crate::config::RetryAppConfig;

pub use offline_chat_adapter::{OFFLINE_MODEL, OfflineChatAdapter};
pub use remote_chat_adapter::RemoteChatAdapter;

/// Pick the chat-completion backend
///
/// The remote model is used when an API key is configured; otherwise
/// replies come from [`OfflineChatAdapter`].
pub fn chat_completion_adapter(
    inference: &InferenceConfig,
    retry: Option<&RetryAppConfig>,
) -> Result<Arc<dyn ChatCompletionPort>, ApplicationError> {
    if !inference.has_api_key() {
        warn!("No model API key configured, using offline replies");
        return Ok(Arc::new(OfflineChatAdapter::new()));
    }

    let retry = retry.cloned().unwrap_or_default().to_retry_config();
    let adapter = RemoteChatAdapter::new(inference.clone())?.with_retry(retry);
    info!(model = %inference.default_model, "Using remote chat model");
    Ok(Arc::new(adapter))
}
