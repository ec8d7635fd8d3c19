//! Quick reset prompt builder
//!
//! Builds the single user message sent to the model when a quick reset is
//! enriched with a model reflection. The classification is passed along as
//! hints for the model, not as text to repeat back.

use domain::{ChatMessage, Lane, Tone, TriggerClassification};

/// Build the message list for a quick reset reflection
#[must_use]
pub fn build_reset_messages(
    text: &str,
    classification: &TriggerClassification,
    lane: Option<Lane>,
    tone: Tone,
) -> Vec<ChatMessage> {
    vec![ChatMessage::user(reset_prompt(text, classification, lane, tone))]
}

/// Text of the quick reset request
#[must_use]
pub fn reset_prompt(
    text: &str,
    classification: &TriggerClassification,
    lane: Option<Lane>,
    tone: Tone,
) -> String {
    let flags = serde_json::to_string(&classification.flags).unwrap_or_default();
    let lane = lane.map_or("none", |l| l.as_str());

    let lines = [
        "You are the InnerNode Equalizer. The user just tapped the Quick Reset button in the middle of a real-life impulse moment.".to_string(),
        String::new(),
        format!("User text: \"{}\"", text.trim()),
        String::new(),
        "Internal classification (for your awareness, not to be repeated back as-is):".to_string(),
        format!("- Emotion cluster: {}", classification.emotion_cluster),
        format!("- Impulse type: {}", classification.impulse_type),
        format!("- Escalation level: {}", classification.escalation_level),
        format!("- Flags: {flags}"),
        format!("- Suggested lane: {lane}"),
        String::new(),
        "Your job:".to_string(),
        "1. Reflect what you heard in simple, human language (1 or 2 sentences).".to_string(),
        "2. Offer 2 to 4 tiny, realistic steps that could interrupt or soften this moment.".to_string(),
        "3. If the risk feels higher (escalation 2 or 3), gently nudge them toward pausing, stepping away, or reaching out to a real human or emergency services when appropriate.".to_string(),
        String::new(),
        format!(
            "Tone preference: {tone} (one of \"gentle\", \"direct\", \"playful\" or \"firm\"). Always respectful, safe, and non-judgmental."
        ),
    ];

    lines.join("\n")
}
