//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod chat_completion_port;

#[cfg(test)]
pub use chat_completion_port::MockChatCompletionPort;
pub use chat_completion_port::{ChatCompletion, ChatCompletionPort};
