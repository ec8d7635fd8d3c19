//! Domain entities

mod chat_message;
mod playbook_result;
mod trigger_classification;

pub use chat_message::{ChatMessage, MessageMetadata, MessageRole};
pub use playbook_result::{PlaybookResult, PlaybookStep};
pub use trigger_classification::TriggerClassification;
