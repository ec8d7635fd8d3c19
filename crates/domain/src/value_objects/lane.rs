//! Response lane value object

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Categorical bucket that drives which canned content a playbook uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Breathe, orient, get through the next few minutes
    Grounding,
    /// Hold the message before it goes out
    DecisionPause,
    /// Don't go over there
    Conflict,
    /// Hold the purchase or bet
    Money,
    /// Don't quit or blow up at the boss right now
    Work,
    /// No big relationship move tonight
    Relationship,
    /// Safety first, bring in people
    Emergency,
}

impl Lane {
    /// Snake-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grounding => "grounding",
            Self::DecisionPause => "decision_pause",
            Self::Conflict => "conflict",
            Self::Money => "money",
            Self::Work => "work",
            Self::Relationship => "relationship",
            Self::Emergency => "emergency",
        }
    }

    /// All lanes
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Grounding,
            Self::DecisionPause,
            Self::Conflict,
            Self::Money,
            Self::Work,
            Self::Relationship,
            Self::Emergency,
        ]
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lane {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|lane| lane.as_str() == s.trim())
            .ok_or_else(|| DomainError::InvalidLane(s.to_string()))
    }
}
