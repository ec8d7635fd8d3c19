//! Model reply normalizer
//!
//! Splits free-form model output into a one-line summary and a list of steps.

use serde::{Deserialize, Serialize};

const FALLBACK_SUMMARY: &str = "Let's slow this moment down together for just a few breaths.";

const FALLBACK_STEPS: [&str; 2] = [
    "Pause for 10 to 20 seconds before you say, send, or do anything.",
    "Name what you're actually trying to protect here: your peace, your pride, your safety, or your future.",
];

/// Model output reshaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReflection {
    /// First non-blank line
    pub summary: String,
    /// Remaining lines with bullets and numbering removed
    pub steps: Vec<String>,
    /// Unmodified model output
    pub raw: String,
}

/// Normalize a model reply
///
/// The first non-blank line becomes the summary. Every later line has leading
/// bullets and list numbers stripped and becomes a step. When no steps remain
/// two generic pause steps are used.
#[must_use]
pub fn normalize_reply(raw: &str) -> ModelReflection {
    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());

    let summary = lines.next().unwrap_or(FALLBACK_SUMMARY).to_string();

    let mut steps: Vec<String> = lines
        .map(strip_list_marker)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if steps.is_empty() {
        steps = FALLBACK_STEPS.iter().map(|s| (*s).to_string()).collect();
    }

    ModelReflection {
        summary,
        steps,
        raw: raw.to_string(),
    }
}

fn strip_list_marker(line: &str) -> &str {
    line.trim_start_matches(|c: char| matches!(c, '-' | '\u{2022}' | '.' | ')') || c.is_ascii_digit())
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_is_summary_and_rest_are_steps() {
        let reply = normalize_reply("That sounds heavy.\n- Breathe slowly\n2) Step outside\n3. Drink water");
        assert_eq!(reply.summary, "That sounds heavy.");
        assert_eq!(reply.steps, vec!["Breathe slowly", "Step outside", "Drink water"]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let reply = normalize_reply("\n\n  Summary here  \n\n   \n\u{2022} One\n");
        assert_eq!(reply.summary, "Summary here");
        assert_eq!(reply.steps, vec!["One"]);
    }

    #[test]
    fn empty_reply_uses_fallbacks() {
        let reply = normalize_reply("   ");
        assert_eq!(reply.summary, FALLBACK_SUMMARY);
        assert_eq!(reply.steps.len(), 2);
        assert_eq!(reply.raw, "   ");
    }

    #[test]
    fn single_line_reply_gets_fallback_steps() {
        let reply = normalize_reply("Just breathe with me.");
        assert_eq!(reply.summary, "Just breathe with me.");
        assert_eq!(reply.steps, FALLBACK_STEPS.to_vec());
    }

    #[test]
    fn marker_only_lines_are_dropped() {
        let reply = normalize_reply("Summary\n-\n1.\nReal step");
        assert_eq!(reply.steps, vec!["Real step"]);
    }

    #[test]
    fn summary_keeps_its_marker() {
        let reply = normalize_reply("1. First thing\n2. Second thing");
        assert_eq!(reply.summary, "1. First thing");
        assert_eq!(reply.steps, vec!["Second thing"]);
    }

    #[test]
    fn text_after_marker_keeps_inner_numbers() {
        let reply = normalize_reply("Ok\n- Make today 2% easier");
        assert_eq!(reply.steps, vec!["Make today 2% easier"]);
    }
}
