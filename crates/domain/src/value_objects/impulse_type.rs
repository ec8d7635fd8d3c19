//! Impulse type value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the impulse in the moment is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseType {
    /// Call, tell someone off, confront verbally
    Say,
    /// Text, post, DM, email, hit send
    Send,
    /// Buy, gamble, max out a card
    Spend,
    /// Drive over, pull up, confront in person
    ShowUp,
    /// Hurting oneself
    SelfHarm,
    /// Hurting someone else
    HarmOther,
    /// Risky sexual behaviour
    SexualRisk,
    /// Something with legal consequences
    LegalRisk,
    /// No impulse detected
    #[default]
    Unknown,
}

impl ImpulseType {
    /// Snake-case name used on the wire and in prompts
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Say => "say",
            Self::Send => "send",
            Self::Spend => "spend",
            Self::ShowUp => "show_up",
            Self::SelfHarm => "self_harm",
            Self::HarmOther => "harm_other",
            Self::SexualRisk => "sexual_risk",
            Self::LegalRisk => "legal_risk",
            Self::Unknown => "unknown",
        }
    }

    /// Impulses that are about communicating something right now
    #[must_use]
    pub const fn is_communication(&self) -> bool {
        matches!(self, Self::Say | Self::Send)
    }
}

impl fmt::Display for ImpulseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
