//! Playbook result entity

use serde::{Deserialize, Serialize};

use super::TriggerClassification;
use crate::value_objects::{Lane, StepEmphasis, Tone};

/// One short instruction in a playbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookStep {
    /// Instruction text
    pub text: String,
    /// Presentation category
    #[serde(default)]
    pub emphasis: StepEmphasis,
}

impl PlaybookStep {
    /// Create a step
    pub fn new(text: impl Into<String>, emphasis: StepEmphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

/// Assembled, human-readable response to one triggered moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookResult {
    /// Lane the content came from; `None` when no lane was computed (blank input)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane: Option<Lane>,
    /// Tone the caller asked for
    pub requested_tone: Tone,
    /// Tone actually used
    pub tone: Tone,
    /// Whether escalation forced a different tone for this call
    pub tone_overridden: bool,
    /// Opening text
    pub intro_line: String,
    /// Ordered steps, never empty
    pub steps: Vec<PlaybookStep>,
    /// Whether the UI should suggest involving a human or professional
    pub escalation_suggested: bool,
    /// Extra safety guidance shown alongside the steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
    /// Classification that produced this result
    pub classification: TriggerClassification,
}

impl PlaybookResult {
    /// Step texts in order
    pub fn step_texts(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text.as_str()).collect()
    }

    /// Whether this is the blank-input prompt rather than lane content
    pub const fn is_prompt_for_more(&self) -> bool {
        self.lane.is_none()
    }
}
