//! Value Objects - Immutable, identity-less domain primitives

mod emotion_cluster;
mod escalation_level;
mod impulse_type;
mod lane;
mod model_hint;
mod risk_flags;
mod step_emphasis;
mod tone;

pub use emotion_cluster::EmotionCluster;
pub use escalation_level::EscalationLevel;
pub use impulse_type::ImpulseType;
pub use lane::Lane;
pub use model_hint::ModelHint;
pub use risk_flags::{RiskFlag, RiskFlags};
pub use step_emphasis::StepEmphasis;
pub use tone::Tone;
