//! Property-based tests for the classifier and playbook engine
//!
//! Inputs are assembled from trigger phrases and neutral filler so that
//! generated text actually exercises the rules.

use application::{
    PlaybookEngine, ScriptTable, TriggerClassifier, classify, emergency_triad, resolve_tone,
    run_playbook,
};
use domain::{EscalationLevel, Lane, Tone};
use proptest::prelude::*;

const TRIGGERS: &[&str] = &[
    "mad",
    "furious",
    "scared",
    "overwhelmed",
    "too much",
    "numb",
    "ashamed",
    "text",
    "call",
    "buy",
    "gambling",
    "pull up",
    "break up",
    "quit my job",
    "gun",
    "knife",
    "kill myself",
    "end it all",
    "hospital",
    "911",
];

const FILLER: &[&str] = &[
    "i", "really", "want", "to", "right", "now", "the", "and", "so", "about", "him", "her",
    "today", "feel", "like", "my", "ex", "boss", "car",
];

const LIFE_THREATS: &[&str] = &["kill myself", "end it all", "gun", "knife", "overdose", "suicidal"];

fn any_tone() -> impl Strategy<Value = Tone> {
    prop::sample::select(Tone::all().to_vec())
}

fn trigger_text() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        prop::sample::select(TRIGGERS.to_vec()),
        prop::sample::select(FILLER.to_vec()),
    ];
    prop::collection::vec(token, 0..12).prop_map(|tokens| tokens.join(" "))
}

fn text_with_life_threat() -> impl Strategy<Value = String> {
    (
        trigger_text(),
        prop::sample::select(LIFE_THREATS.to_vec()),
        trigger_text(),
    )
        .prop_map(|(before, threat, after)| format!("{before} {threat} {after}"))
}

// ============================================================================
// Classifier Property Tests
// ============================================================================

mod classifier_tests {
    use super::*;

    proptest! {
        #[test]
        fn classification_is_deterministic(text in trigger_text()) {
            prop_assert_eq!(classify(&text), classify(&text));
        }

        #[test]
        fn classification_never_panics(text in "\\PC*") {
            let _ = TriggerClassifier::new().classify(&text);
        }

        #[test]
        fn level_three_iff_life_threat(text in trigger_text()) {
            let c = classify(&text);
            prop_assert_eq!(
                c.escalation_level == EscalationLevel::Emergency,
                c.flags.weapon || c.flags.self_harm
            );
        }

        #[test]
        fn level_two_implies_situational_risk(text in trigger_text()) {
            let c = classify(&text);
            if c.escalation_level == EscalationLevel::High {
                prop_assert!(c.flags.money_risk || c.flags.relationship_risk || c.flags.work_risk);
            }
        }

        #[test]
        fn life_threat_always_reaches_level_three(text in text_with_life_threat()) {
            prop_assert_eq!(classify(&text).escalation_level, EscalationLevel::Emergency);
        }
    }
}

// ============================================================================
// Playbook Property Tests
// ============================================================================

mod playbook_tests {
    use super::*;

    proptest! {
        #[test]
        fn playbook_is_deterministic(text in trigger_text(), tone in any_tone()) {
            prop_assert_eq!(run_playbook(&text, Some(tone)), run_playbook(&text, Some(tone)));
        }

        #[test]
        fn steps_are_never_fewer_than_two(text in "\\PC*", tone in any_tone()) {
            prop_assert!(run_playbook(&text, Some(tone)).steps.len() >= 2);
        }

        #[test]
        fn steps_survive_an_empty_table(text in trigger_text(), tone in any_tone()) {
            let engine = PlaybookEngine::new(ScriptTable::empty());
            prop_assert!(engine.run(&text, Some(tone)).steps.len() >= 2);
        }

        #[test]
        fn emergency_opens_with_triad(text in text_with_life_threat(), tone in any_tone()) {
            let result = run_playbook(&text, Some(tone));
            let triad = emergency_triad();
            prop_assert_eq!(result.lane, Some(Lane::Emergency));
            prop_assert_eq!(&result.steps[..3], &triad[..]);
        }

        #[test]
        fn override_is_announced(text in trigger_text(), tone in any_tone()) {
            let result = run_playbook(&text, Some(tone));
            let level = result.classification.escalation_level;
            if level >= EscalationLevel::High {
                prop_assert_eq!(result.tone, Tone::Firm);
                if tone != Tone::Firm {
                    let notice = resolve_tone(tone, level).notice.unwrap();
                    prop_assert!(result.tone_overridden);
                    prop_assert!(result.intro_line.starts_with(notice));
                }
            } else {
                prop_assert_eq!(result.tone, tone);
                prop_assert!(!result.tone_overridden);
            }
        }

        #[test]
        fn blank_text_is_prompt_for_more(spaces in "[ \\t\\n]{0,8}", tone in any_tone()) {
            let result = run_playbook(&spaces, Some(tone));
            prop_assert!(result.lane.is_none());
            prop_assert_eq!(result.steps.len(), 2);
            prop_assert!(!result.escalation_suggested);
        }

        #[test]
        fn high_levels_suggest_escalation(text in trigger_text()) {
            let result = run_playbook(&text, None);
            if result.classification.escalation_level >= EscalationLevel::High {
                prop_assert!(result.escalation_suggested);
                prop_assert!(result.safety_note.is_some());
            }
        }
    }
}

// ============================================================================
// Documented Scenarios
// ============================================================================

mod scenarios {
    use super::*;
    use domain::{EmotionCluster, ImpulseType, TriggerClassification};

    #[test]
    fn self_harm_statement() {
        let result = run_playbook("I'm going to kill myself", None);
        let c = result.classification;
        assert!(c.flags.self_harm);
        assert_eq!(c.escalation_level, EscalationLevel::Emergency);
        assert_eq!(c.impulse_type, ImpulseType::SelfHarm);
        assert_eq!(result.lane, Some(Lane::Emergency));
        let first = result.steps[0].text.to_lowercase();
        assert!(first.contains("emergency") || first.contains("crisis"));
    }

    #[test]
    fn impulse_purchase_while_angry() {
        let result = run_playbook("I want to buy a car I can't afford right now I'm so mad", None);
        let c = result.classification;
        assert!(c.flags.money_risk);
        assert!(matches!(
            c.emotion_cluster,
            EmotionCluster::Anger | EmotionCluster::Mixed
        ));
        assert_eq!(c.escalation_level, EscalationLevel::High);
        assert_eq!(result.lane, Some(Lane::Money));
    }

    #[test]
    fn overwhelm_without_impulse() {
        let result = run_playbook("I feel really overwhelmed and can't handle this", None);
        let c = result.classification;
        assert_eq!(c.emotion_cluster, EmotionCluster::Overwhelm);
        assert_eq!(c.escalation_level, EscalationLevel::Medium);
        assert_eq!(result.lane, Some(Lane::Grounding));
    }

    #[test]
    fn empty_input() {
        let result = run_playbook("", None);
        assert_eq!(result.classification, TriggerClassification::empty());
        assert_eq!(result.classification.emotion_cluster, EmotionCluster::Unknown);
        assert_eq!(result.classification.escalation_level, EscalationLevel::Low);
        assert!(result.lane.is_none());
        assert_eq!(result.steps.len(), 2);
    }

    #[test]
    fn texting_an_ex() {
        let result = run_playbook("I'm about to text my ex something I'll regret", None);
        assert_eq!(result.classification.impulse_type, ImpulseType::Send);
        assert_eq!(result.lane, Some(Lane::DecisionPause));
        assert!(
            result
                .step_texts()
                .iter()
                .any(|s| s.to_lowercase().contains("pause before sending"))
        );
    }
}
