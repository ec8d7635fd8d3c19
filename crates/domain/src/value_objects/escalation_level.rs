//! Escalation level value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Monotonic severity ladder derived from free text
///
/// Serialized as its numeric value (0-3). Level 3 is reserved for
/// self-harm, harm-to-others and weapon signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum EscalationLevel {
    /// Nothing risky detected
    #[default]
    Low,
    /// Activating emotion (anger, overwhelm)
    Medium,
    /// Money, relationship or work consequences
    High,
    /// Self-harm, harm to others, weapons
    Emergency,
}

impl EscalationLevel {
    /// Numeric level (0-3)
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Emergency => 3,
        }
    }

    /// Whether the playbook must switch to a firm tone
    #[must_use]
    pub const fn requires_firm_tone(self) -> bool {
        matches!(self, Self::High | Self::Emergency)
    }

    /// Whether this is the emergency level
    #[must_use]
    pub const fn is_emergency(self) -> bool {
        matches!(self, Self::Emergency)
    }
}

impl TryFrom<u8> for EscalationLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Emergency),
            other => Err(DomainError::InvalidEscalationLevel(other)),
        }
    }
}

impl From<EscalationLevel> for u8 {
    fn from(level: EscalationLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_severity() {
        assert!(EscalationLevel::Low < EscalationLevel::Medium);
        assert!(EscalationLevel::Medium < EscalationLevel::High);
        assert!(EscalationLevel::High < EscalationLevel::Emergency);
    }

    #[test]
    fn firm_tone_from_level_two() {
        assert!(!EscalationLevel::Low.requires_firm_tone());
        assert!(!EscalationLevel::Medium.requires_firm_tone());
        assert!(EscalationLevel::High.requires_firm_tone());
        assert!(EscalationLevel::Emergency.requires_firm_tone());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = EscalationLevel::try_from(4).unwrap_err();
        assert!(matches!(err, DomainError::InvalidEscalationLevel(4)));
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&EscalationLevel::High).unwrap(), "2");
        let level: EscalationLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level, EscalationLevel::Emergency);
        assert!(serde_json::from_str::<EscalationLevel>("9").is_err());
    }
}
