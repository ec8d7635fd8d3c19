//! AI Core - Chat completion client
//!
//! Talks to an OpenAI-compatible `/v1/chat/completions` endpoint. The request
//! and response types here are transport-level; the application layer sees
//! them through its own port.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiChatEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};
