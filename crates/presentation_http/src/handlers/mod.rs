//! HTTP request handlers

pub mod chat;
pub mod companion;
pub mod equalizer;
pub mod health;
