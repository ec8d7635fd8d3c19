//! System prompts per model hint

use domain::ModelHint;

const QUICK_RESET_PROMPT: &str = "\
You are InnerNode's Equalizer, a grounded and non-judgmental reset guide.
Your job: help the user interrupt an impulsive reaction, settle their nervous system,
and find one or two tiny, realistic next steps.

Tone:
- Calm, practical, human.
- No therapy jargon and no fake hype.
- One short paragraph plus 2 or 3 short bullet suggestions is enough.

Safety:
- If you detect self-harm or harm to others, gently encourage reaching out
  to crisis resources or a trusted person. Never give instructions for harm.";

const LESSON_PROMPT: &str = "\
You are InnerNode's lesson reflection guide.
Your job: connect the lesson concept to the user's real life
using simple language, concrete examples, and 1 or 2 reflection questions.
Keep replies short and readable.";

const COMPANION_PROMPT: &str = "\
You are the InnerNode Companion: a grounded, kind presence.
You listen first, reflect what you heard in plain language, and then offer
one or two practical next steps the user could actually take today.
No therapy-speak and no toxic positivity. Sound like a real friend
with good emotional intelligence.";

/// System prompt prepended for a hint
#[must_use]
pub const fn system_prompt(hint: ModelHint) -> &'static str {
    match hint {
        ModelHint::QuickReset => QUICK_RESET_PROMPT,
        ModelHint::Lesson => LESSON_PROMPT,
        ModelHint::Companion => COMPANION_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_hint_has_its_own_prompt() {
        let prompts = [
            system_prompt(ModelHint::Companion),
            system_prompt(ModelHint::QuickReset),
            system_prompt(ModelHint::Lesson),
        ];
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert_ne!(prompts[0], prompts[2]);
    }

    #[test]
    fn quick_reset_prompt_covers_safety() {
        assert!(system_prompt(ModelHint::QuickReset).contains("crisis resources"));
    }

    #[test]
    fn default_hint_is_companion_prompt() {
        assert!(system_prompt(ModelHint::default()).starts_with("You are the InnerNode Companion"));
    }
}
