//! Response tone value object

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Voice the caller prefers for the assembled response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Soft, reassuring
    #[default]
    Gentle,
    /// Plain and to the point
    Direct,
    /// Light, a little humour
    Playful,
    /// Directive; used when the moment carries real consequences
    Firm,
}

impl Tone {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Direct => "direct",
            Self::Playful => "playful",
            Self::Firm => "firm",
        }
    }

    /// All tones
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Gentle, Self::Direct, Self::Playful, Self::Firm]
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gentle" | "soft" => Ok(Self::Gentle),
            "direct" => Ok(Self::Direct),
            "playful" => Ok(Self::Playful),
            "firm" => Ok(Self::Firm),
            _ => Err(DomainError::InvalidTone(s.to_string())),
        }
    }
}
