//! Emotion cluster value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion bucket a piece of free text leans towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCluster {
    /// Irritation, rage, urge to fight
    Anger,
    /// Anxiety, panic, being on edge
    Fear,
    /// Grief, low mood
    Sadness,
    /// Embarrassment, humiliation, feeling worthless
    Shame,
    /// Too much at once, breaking down
    Overwhelm,
    /// Shut down, empty, nothing
    Numb,
    /// Several strong families matched at once
    Mixed,
    /// Something was said but no known pattern matched
    LowIntensity,
    /// Nothing was said
    #[default]
    Unknown,
}

impl EmotionCluster {
    /// Snake-case name used on the wire and in prompts
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Sadness => "sadness",
            Self::Shame => "shame",
            Self::Overwhelm => "overwhelm",
            Self::Numb => "numb",
            Self::Mixed => "mixed",
            Self::LowIntensity => "low_intensity",
            Self::Unknown => "unknown",
        }
    }

    /// Clusters that raise escalation to level 1 on their own
    #[must_use]
    pub const fn is_activating(&self) -> bool {
        matches!(self, Self::Anger | Self::Overwhelm)
    }

    /// Clusters the grounding lane is written for
    #[must_use]
    pub const fn needs_grounding(&self) -> bool {
        matches!(self, Self::Overwhelm | Self::Numb)
    }

    /// All clusters in declaration order
    #[must_use]
    pub const fn all() -> [Self; 9] {
        [
            Self::Anger,
            Self::Fear,
            Self::Sadness,
            Self::Shame,
            Self::Overwhelm,
            Self::Numb,
            Self::Mixed,
            Self::LowIntensity,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for EmotionCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
