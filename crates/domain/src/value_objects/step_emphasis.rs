//! Step emphasis value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a playbook step should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepEmphasis {
    /// Body-level settling
    #[default]
    Calm,
    /// Stop or safety instruction
    Warning,
    /// "This reaction makes sense"
    Normalize,
    /// Concrete next move
    Plan,
}

impl fmt::Display for StepEmphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Calm => "calm",
            Self::Warning => "warning",
            Self::Normalize => "normalize",
            Self::Plan => "plan",
        };
        write!(f, "{s}")
    }
}
