//! Trigger classification entity
//!
//! The structured reading of one piece of free text: which emotion family it
//! leans towards, what the impulse is trying to do, how severe the moment is
//! and which independent risk signals were raised.

use serde::{Deserialize, Serialize};

use crate::value_objects::{EmotionCluster, EscalationLevel, ImpulseType, RiskFlags};

/// Result of classifying free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TriggerClassification {
    /// Emotion bucket
    pub emotion_cluster: EmotionCluster,
    /// What the impulse is trying to do
    pub impulse_type: ImpulseType,
    /// Severity ladder position
    pub escalation_level: EscalationLevel,
    /// Independent risk signals
    pub flags: RiskFlags,
}

impl TriggerClassification {
    /// Classification of empty input
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the level is the emergency level
    #[must_use]
    pub const fn is_emergency(&self) -> bool {
        self.escalation_level.is_emergency()
    }

    /// Whether the level/flag pair is consistent
    ///
    /// Level 3 if and only if a weapon or self-harm signal was raised.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.escalation_level.is_emergency() == self.flags.threatens_life()
    }
}
