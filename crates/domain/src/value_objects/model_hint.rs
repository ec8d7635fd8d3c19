//! Model hint value object

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Surface a chat-completion request originates from
///
/// Selects the system prompt that is prepended before the request
/// reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelHint {
    /// Free-form companion chat
    #[default]
    Companion,
    /// Equalizer quick reset
    QuickReset,
    /// Lesson reflections
    Lesson,
}

impl ModelHint {
    /// Snake-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Companion => "companion",
            Self::QuickReset => "quick_reset",
            Self::Lesson => "lesson",
        }
    }
}

impl fmt::Display for ModelHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelHint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "companion" => Ok(Self::Companion),
            "quick_reset" | "quickReset" => Ok(Self::QuickReset),
            "lesson" => Ok(Self::Lesson),
            other => Err(DomainError::InvalidModelHint(other.to_string())),
        }
    }
}
