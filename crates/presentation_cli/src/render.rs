//! Plain-text rendering of classifier and playbook output

use std::fmt::Write as _;

use domain::{PlaybookResult, TriggerClassification};

/// Render a classification as aligned key/value lines
pub fn classification(classification: &TriggerClassification, matched_terms: &[&str]) -> String {
    let flags: Vec<&str> = classification
        .flags
        .active()
        .iter()
        .map(|f| f.as_str())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "emotion:    {}", classification.emotion_cluster);
    let _ = writeln!(out, "impulse:    {}", classification.impulse_type);
    let _ = writeln!(out, "escalation: {}", classification.escalation_level);
    let _ = writeln!(out, "flags:      {}", join_or_none(&flags));
    let _ = writeln!(out, "matched:    {}", join_or_none(matched_terms));
    out
}

/// Render a playbook result the way a reader would see it
pub fn playbook(result: &PlaybookResult) -> String {
    let mut out = String::new();

    if let Some(lane) = result.lane {
        let _ = write!(out, "[{lane} | {}", result.tone);
        if result.tone_overridden {
            let _ = write!(out, ", asked for {}", result.requested_tone);
        }
        let _ = writeln!(out, "]");
    }

    let _ = writeln!(out, "{}", result.intro_line);
    out.push('\n');
    for (i, step) in result.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step.text);
    }

    if let Some(note) = &result.safety_note {
        out.push('\n');
        let _ = writeln!(out, "! {note}");
    }
    if result.escalation_suggested {
        let _ = writeln!(out, "Consider reaching out to someone you trust or a professional.");
    }

    out
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
