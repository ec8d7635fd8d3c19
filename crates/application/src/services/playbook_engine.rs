//! Playbook engine
//!
//! Turns a trigger classification and a preferred tone into a
//! [`PlaybookResult`]: a lane, an intro line, ordered steps and an optional
//! safety note. Pure and synchronous; one engine can be shared across threads.

use std::sync::LazyLock;

use domain::{
    EscalationLevel, ImpulseType, Lane, PlaybookResult, PlaybookStep, StepEmphasis, Tone,
    TriggerClassification,
};
use tracing::{debug, info, instrument};

use super::script_table::ScriptTable;
use super::trigger_classifier::TriggerClassifier;

/// Prepended to the intro when level 2 forces a firm tone
const OVERRIDE_NOTICE_HIGH: &str = "I'm going to be more direct than usual for a moment, because what you're about to do could have real consequences.";

/// Prepended to the intro when level 3 forces a firm tone
const OVERRIDE_NOTICE_EMERGENCY: &str =
    "I'm switching to a firmer voice right now, because your safety matters more than tone.";

const PROMPT_FOR_MORE_INTRO: &str = "Tell me a little about what just happened or what you're about to do, so I can help you slow it down.";

const FALLBACK_INTRO: &str = "Let's slow this moment down together for just a few breaths.";

const CRISIS_NOTE: &str = "If you might act on this, contact emergency services or a crisis line now (in the US, call or text 988). You deserve real-time support from a person.";

const HIGH_RISK_NOTE: &str =
    "Before you act, consider talking this through with someone you trust.";

const EMERGENCY_WORDS_NOTE: &str =
    "If anyone is in danger right now, contact your local emergency services.";

fn prompt_for_more_steps() -> Vec<PlaybookStep> {
    vec![
        PlaybookStep::new(
            "Take one slow, deep breath in through your nose, out through your mouth.",
            StepEmphasis::Calm,
        ),
        PlaybookStep::new(
            "In one or two sentences, describe the moment you're in. Not your whole life story, just this scene.",
            StepEmphasis::Plan,
        ),
    ]
}

/// Generic steps used when a lane has no content
#[must_use]
pub fn fallback_steps() -> Vec<PlaybookStep> {
    vec![
        PlaybookStep::new(
            "Pause for 10 to 20 seconds before you say, send, or do anything.",
            StepEmphasis::Warning,
        ),
        PlaybookStep::new(
            "Name what you're actually trying to protect here: your peace, your pride, your safety, or your future.",
            StepEmphasis::Plan,
        ),
    ]
}

/// Safety steps that always open the emergency lane, in this order
#[must_use]
pub fn emergency_triad() -> [PlaybookStep; 3] {
    [
        PlaybookStep::new(
            "If you are in immediate danger, call your local emergency number or a crisis line now (in the US, call or text 988).",
            StepEmphasis::Warning,
        ),
        PlaybookStep::new(
            "Put distance between yourself and anything you could use to hurt yourself or someone else: another room, or let someone else hold it.",
            StepEmphasis::Warning,
        ),
        PlaybookStep::new(
            "Reach out to one trusted person right now and tell them you need them with you.",
            StepEmphasis::Plan,
        ),
    ]
}

/// Outcome of reconciling the caller's tone with the escalation level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneResolution {
    /// Tone the caller asked for
    pub requested: Tone,
    /// Tone to use
    pub applied: Tone,
    /// Sentence explaining the switch, when one happened
    pub notice: Option<&'static str>,
}

impl ToneResolution {
    /// Whether the applied tone differs from the requested one
    #[must_use]
    pub fn overridden(&self) -> bool {
        self.requested != self.applied
    }
}

/// Resolve the tone for one call
///
/// Level 2 and above force [`Tone::Firm`]; the caller's tone is untouched
/// otherwise.
#[must_use]
pub fn resolve_tone(requested: Tone, level: EscalationLevel) -> ToneResolution {
    if !level.requires_firm_tone() || requested == Tone::Firm {
        return ToneResolution {
            requested,
            applied: requested,
            notice: None,
        };
    }

    let notice = if level.is_emergency() {
        OVERRIDE_NOTICE_EMERGENCY
    } else {
        OVERRIDE_NOTICE_HIGH
    };
    ToneResolution {
        requested,
        applied: Tone::Firm,
        notice: Some(notice),
    }
}

/// Pick the lane for a classification
///
/// Level 3 always routes to the emergency lane. Situational risk flags come
/// next (money, then work, then relationship), then the impulse, then the
/// emotion cluster.
#[must_use]
pub fn select_lane(classification: &TriggerClassification) -> Lane {
    let flags = &classification.flags;

    if classification.escalation_level.is_emergency() {
        return Lane::Emergency;
    }
    if flags.money_risk {
        return Lane::Money;
    }
    if flags.work_risk {
        return Lane::Work;
    }
    if flags.relationship_risk {
        return Lane::Relationship;
    }

    match classification.impulse_type {
        ImpulseType::ShowUp => Lane::Conflict,
        ImpulseType::Send | ImpulseType::Say => Lane::DecisionPause,
        ImpulseType::Spend
        | ImpulseType::SelfHarm
        | ImpulseType::HarmOther
        | ImpulseType::SexualRisk
        | ImpulseType::LegalRisk
        | ImpulseType::Unknown => Lane::Grounding,
    }
}

/// Safety note for a classification, if one applies
#[must_use]
pub fn safety_note(classification: &TriggerClassification) -> Option<&'static str> {
    match classification.escalation_level {
        EscalationLevel::Emergency => Some(CRISIS_NOTE),
        EscalationLevel::High => Some(HIGH_RISK_NOTE),
        EscalationLevel::Low | EscalationLevel::Medium => classification
            .flags
            .emergency_words
            .then_some(EMERGENCY_WORDS_NOTE),
    }
}

/// Whether the UI should suggest involving a human or professional
#[must_use]
pub fn escalation_suggested(classification: &TriggerClassification) -> bool {
    classification.escalation_level.requires_firm_tone() || classification.flags.emergency_words
}

/// Assembles playbook results from a script table
#[derive(Debug, Clone)]
pub struct PlaybookEngine {
    classifier: TriggerClassifier,
    scripts: ScriptTable,
}

impl Default for PlaybookEngine {
    fn default() -> Self {
        Self::new(ScriptTable::builtin())
    }
}

impl PlaybookEngine {
    /// Create an engine over a script table
    #[must_use]
    pub fn new(scripts: ScriptTable) -> Self {
        Self {
            classifier: TriggerClassifier::new(),
            scripts,
        }
    }

    /// Script table in use
    #[must_use]
    pub fn scripts(&self) -> &ScriptTable {
        &self.scripts
    }

    /// Classify text without assembling a playbook
    #[must_use]
    pub fn classify(&self, text: &str) -> TriggerClassification {
        self.classifier.classify(text)
    }

    /// Classify text and assemble a playbook for it
    ///
    /// Blank input returns a fixed prompt asking for more detail, with no lane.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn run(&self, text: &str, tone: Option<Tone>) -> PlaybookResult {
        let requested = tone.unwrap_or_default();

        if text.trim().is_empty() {
            debug!("Blank input, asking for more detail");
            return PlaybookResult {
                lane: None,
                requested_tone: requested,
                tone: requested,
                tone_overridden: false,
                intro_line: PROMPT_FOR_MORE_INTRO.to_string(),
                steps: prompt_for_more_steps(),
                escalation_suggested: false,
                safety_note: None,
                classification: self.classifier.classify(""),
            };
        }

        let classification = self.classifier.classify(text);
        self.respond(classification, tone)
    }

    /// Assemble a playbook for an existing classification
    pub fn respond(
        &self,
        classification: TriggerClassification,
        tone: Option<Tone>,
    ) -> PlaybookResult {
        let lane = select_lane(&classification);
        let resolution = resolve_tone(tone.unwrap_or_default(), classification.escalation_level);
        let script = self.scripts.lane(lane);

        let mut intro_line = String::new();
        if let Some(notice) = resolution.notice {
            intro_line.push_str(notice);
            intro_line.push(' ');
        }
        if lane != Lane::Emergency {
            if let Some(opener) = self.scripts.opener(classification.emotion_cluster) {
                intro_line.push_str(opener);
                intro_line.push(' ');
            }
        }
        let lane_intro = script
            .map(|s| s.intro.get(resolution.applied))
            .filter(|line| !line.trim().is_empty())
            .unwrap_or(FALLBACK_INTRO);
        intro_line.push_str(lane_intro);

        let mut steps = Vec::new();
        if lane == Lane::Emergency {
            steps.extend(emergency_triad());
        }
        if let Some(script) = script {
            steps.extend(
                script
                    .steps
                    .iter()
                    .filter(|s| !s.text.trim().is_empty())
                    .cloned(),
            );
        }
        if steps.len() < 2 {
            steps.extend(fallback_steps());
        }

        if classification.escalation_level >= EscalationLevel::High {
            info!(
                level = classification.escalation_level.as_u8(),
                lane = %lane,
                tone_overridden = resolution.overridden(),
                "Escalated trigger"
            );
        } else {
            debug!(lane = %lane, tone = %resolution.applied, "Assembled playbook");
        }

        PlaybookResult {
            lane: Some(lane),
            requested_tone: resolution.requested,
            tone: resolution.applied,
            tone_overridden: resolution.overridden(),
            intro_line,
            steps,
            escalation_suggested: escalation_suggested(&classification),
            safety_note: safety_note(&classification).map(str::to_string),
            classification,
        }
    }
}

static DEFAULT_ENGINE: LazyLock<PlaybookEngine> = LazyLock::new(PlaybookEngine::default);

/// Run the built-in playbook for a piece of text
#[must_use]
pub fn run_playbook(text: &str, tone: Option<Tone>) -> PlaybookResult {
    DEFAULT_ENGINE.run(text, tone)
}
