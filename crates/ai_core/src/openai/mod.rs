//! OpenAI-compatible chat completion engine

mod client;

pub use client::OpenAiChatEngine;
