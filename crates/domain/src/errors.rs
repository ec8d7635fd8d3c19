//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown tone name
    #[error("Invalid tone: {0}")]
    InvalidTone(String),

    /// Unknown lane name
    #[error("Invalid lane: {0}")]
    InvalidLane(String),

    /// Escalation level outside 0..=3
    #[error("Invalid escalation level: {0}")]
    InvalidEscalationLevel(u8),

    /// Unknown model hint
    #[error("Invalid model hint: {0}")]
    InvalidModelHint(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
