//! Risk flag value objects
//!
//! Flags are independent boolean signals. They are orthogonal to the emotion
//! cluster and impulse type and may co-occur freely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single risk signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    /// Mentions a gun, knife or other weapon
    Weapon,
    /// Mentions suicide, self-harm or overdose
    SelfHarm,
    /// Mentions 911, police, hospital, ER
    EmergencyWords,
    /// Spending, gambling, maxing out cards
    MoneyRisk,
    /// Break-ups, affairs, hook-ups
    RelationshipRisk,
    /// Quitting, walking out, blowing up at the boss
    WorkRisk,
}

impl RiskFlag {
    /// All flags in declaration order
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Weapon,
            Self::SelfHarm,
            Self::EmergencyWords,
            Self::MoneyRisk,
            Self::RelationshipRisk,
            Self::WorkRisk,
        ]
    }

    /// Snake-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::SelfHarm => "self_harm",
            Self::EmergencyWords => "emergency_words",
            Self::MoneyRisk => "money_risk",
            Self::RelationshipRisk => "relationship_risk",
            Self::WorkRisk => "work_risk",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of risk signals raised by one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RiskFlags {
    #[serde(default)]
    pub weapon: bool,
    #[serde(default)]
    pub self_harm: bool,
    #[serde(default)]
    pub emergency_words: bool,
    #[serde(default)]
    pub money_risk: bool,
    #[serde(default)]
    pub relationship_risk: bool,
    #[serde(default)]
    pub work_risk: bool,
}

impl RiskFlags {
    /// Raise a flag
    pub fn raise(&mut self, flag: RiskFlag) {
        *self.slot_mut(flag) = true;
    }

    /// Builder-style variant of [`RiskFlags::raise`]
    #[must_use]
    pub fn with(mut self, flag: RiskFlag) -> Self {
        self.raise(flag);
        self
    }

    /// Whether a flag is raised
    #[must_use]
    pub const fn contains(&self, flag: RiskFlag) -> bool {
        match flag {
            RiskFlag::Weapon => self.weapon,
            RiskFlag::SelfHarm => self.self_harm,
            RiskFlag::EmergencyWords => self.emergency_words,
            RiskFlag::MoneyRisk => self.money_risk,
            RiskFlag::RelationshipRisk => self.relationship_risk,
            RiskFlag::WorkRisk => self.work_risk,
        }
    }

    /// Weapon or self-harm: the only signals that reach level 3
    #[must_use]
    pub const fn threatens_life(&self) -> bool {
        self.weapon || self.self_harm
    }

    /// Money, relationship or work consequences
    #[must_use]
    pub const fn has_situational_risk(&self) -> bool {
        self.money_risk || self.relationship_risk || self.work_risk
    }

    /// Raised flags in declaration order
    #[must_use]
    pub fn active(&self) -> Vec<RiskFlag> {
        RiskFlag::all()
            .into_iter()
            .filter(|flag| self.contains(*flag))
            .collect()
    }

    /// Whether no flag is raised
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    fn slot_mut(&mut self, flag: RiskFlag) -> &mut bool {
        match flag {
            RiskFlag::Weapon => &mut self.weapon,
            RiskFlag::SelfHarm => &mut self.self_harm,
            RiskFlag::EmergencyWords => &mut self.emergency_words,
            RiskFlag::MoneyRisk => &mut self.money_risk,
            RiskFlag::RelationshipRisk => &mut self.relationship_risk,
            RiskFlag::WorkRisk => &mut self.work_risk,
        }
    }
}
