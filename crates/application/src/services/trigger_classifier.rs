//! Trigger classifier
//!
//! Maps free text to an emotion cluster, an impulse type, an escalation level
//! and a set of risk flags. Every trigger phrase is searched in one
//! Aho-Corasick pass over the normalized text. The resolution rules are then
//! applied to the set of hits, so the result does not depend on where in the
//! text a phrase appears.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use domain::{
    EmotionCluster, EscalationLevel, ImpulseType, RiskFlag, RiskFlags, TriggerClassification,
};
use tracing::debug;

/// Emotion families that have trigger phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Anger,
    Fear,
    Overwhelm,
    Numb,
    Shame,
}

/// What a matched phrase signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Emotion(Family),
    Impulse(ImpulseType),
    Flag(RiskFlag),
}

/// Pattern definition for trigger detection
struct TriggerPattern {
    pattern: &'static str,
    signal: Signal,
    /// Reject hits embedded in a longer word ("er" in "her")
    whole_word: bool,
}

const fn phrase(pattern: &'static str, signal: Signal) -> TriggerPattern {
    TriggerPattern {
        pattern,
        signal,
        whole_word: false,
    }
}

const fn word(pattern: &'static str, signal: Signal) -> TriggerPattern {
    TriggerPattern {
        pattern,
        signal,
        whole_word: true,
    }
}

const ANGER: Signal = Signal::Emotion(Family::Anger);
const FEAR: Signal = Signal::Emotion(Family::Fear);
const OVERWHELM: Signal = Signal::Emotion(Family::Overwhelm);
const NUMB: Signal = Signal::Emotion(Family::Numb);
const SHAME: Signal = Signal::Emotion(Family::Shame);
const SEND: Signal = Signal::Impulse(ImpulseType::Send);
const SAY: Signal = Signal::Impulse(ImpulseType::Say);
const SPEND: Signal = Signal::Impulse(ImpulseType::Spend);
const SHOW_UP: Signal = Signal::Impulse(ImpulseType::ShowUp);
const RELATIONSHIP: Signal = Signal::Flag(RiskFlag::RelationshipRisk);
const WORK: Signal = Signal::Flag(RiskFlag::WorkRisk);
const WEAPON: Signal = Signal::Flag(RiskFlag::Weapon);
const SELF_HARM: Signal = Signal::Flag(RiskFlag::SelfHarm);
const EMERGENCY: Signal = Signal::Flag(RiskFlag::EmergencyWords);

/// All trigger patterns organized by signal
static TRIGGER_PATTERNS: LazyLock<Vec<TriggerPattern>> = LazyLock::new(|| {
    vec![
        // Anger / conflict
        word("mad", ANGER),
        phrase("pissed", ANGER),
        phrase("furious", ANGER),
        word("rage", ANGER),
        phrase("enraged", ANGER),
        phrase("angry", ANGER),
        word("fight", ANGER),
        word("fights", ANGER),
        word("fighting", ANGER),
        phrase("scream", ANGER),
        word("yell", ANGER),
        phrase("yelling", ANGER),
        phrase("explode", ANGER),
        word("snap", ANGER),
        // Fear / anxiety
        phrase("scared", FEAR),
        phrase("afraid", FEAR),
        phrase("anxious", FEAR),
        phrase("anxiety", FEAR),
        phrase("panic", FEAR),
        phrase("terrified", FEAR),
        phrase("can't breathe", FEAR),
        phrase("cant breathe", FEAR),
        phrase("on edge", FEAR),
        phrase("freaking out", FEAR),
        // Overwhelm
        phrase("overwhelm", OVERWHELM),
        phrase("too much", OVERWHELM),
        phrase("can't handle", OVERWHELM),
        phrase("cant handle", OVERWHELM),
        phrase("breaking down", OVERWHELM),
        phrase("falling apart", OVERWHELM),
        // Numb
        word("numb", NUMB),
        phrase("feel nothing", NUMB),
        phrase("don't feel", NUMB),
        phrase("dont feel", NUMB),
        word("empty", NUMB),
        // Shame
        phrase("ashamed", SHAME),
        phrase("embarrassed", SHAME),
        phrase("humiliated", SHAME),
        phrase("worthless", SHAME),
        phrase("failure", SHAME),
        // Impulse: send
        word("text", SEND),
        word("texts", SEND),
        word("texted", SEND),
        word("texting", SEND),
        word("send", SEND),
        word("sends", SEND),
        word("sending", SEND),
        word("sent", SEND),
        word("post", SEND),
        word("posts", SEND),
        word("posted", SEND),
        word("posting", SEND),
        word("dm", SEND),
        word("dms", SEND),
        word("dmed", SEND),
        word("dming", SEND),
        phrase("message", SEND),
        phrase("email", SEND),
        // Impulse: say
        word("call", SAY),
        word("calls", SAY),
        word("called", SAY),
        word("calling", SAY),
        phrase("tell them off", SAY),
        phrase("tell him off", SAY),
        phrase("tell her off", SAY),
        phrase("cuss them out", SAY),
        phrase("cuss him out", SAY),
        phrase("cuss her out", SAY),
        phrase("go off on", SAY),
        // Impulse: spend
        word("buy", SPEND),
        word("buys", SPEND),
        word("bought", SPEND),
        word("buying", SPEND),
        word("spend", SPEND),
        word("spends", SPEND),
        word("spending", SPEND),
        phrase("gamble", SPEND),
        phrase("gambling", SPEND),
        word("bet", SPEND),
        phrase("betting", SPEND),
        phrase("casino", SPEND),
        phrase("swipe my card", SPEND),
        phrase("max out", SPEND),
        // Impulse: show up
        phrase("pull up", SHOW_UP),
        phrase("pulling up", SHOW_UP),
        phrase("go over there", SHOW_UP),
        phrase("drive over", SHOW_UP),
        phrase("show up", SHOW_UP),
        phrase("showing up", SHOW_UP),
        // Relationship
        phrase("break up", RELATIONSHIP),
        phrase("breakup", RELATIONSHIP),
        phrase("leave them", RELATIONSHIP),
        phrase("leave him", RELATIONSHIP),
        phrase("leave her", RELATIONSHIP),
        phrase("cheat", RELATIONSHIP),
        phrase("affair", RELATIONSHIP),
        phrase("go home with", RELATIONSHIP),
        phrase("hook up", RELATIONSHIP),
        phrase("hookup", RELATIONSHIP),
        // Work
        phrase("quit my job", WORK),
        phrase("walk out", WORK),
        phrase("cuss out my boss", WORK),
        phrase("email my boss", WORK),
        phrase("tell my boss off", WORK),
        // Weapons
        word("gun", WEAPON),
        word("guns", WEAPON),
        phrase("pistol", WEAPON),
        phrase("rifle", WEAPON),
        phrase("knife", WEAPON),
        phrase("knives", WEAPON),
        phrase("weapon", WEAPON),
        word("shoot", WEAPON),
        word("shoots", WEAPON),
        word("shooting", WEAPON),
        word("stab", WEAPON),
        phrase("stabbing", WEAPON),
        // Self-harm
        phrase("kill myself", SELF_HARM),
        phrase("suicide", SELF_HARM),
        phrase("suicidal", SELF_HARM),
        word("end it all", SELF_HARM),
        phrase("don't want to live", SELF_HARM),
        phrase("dont want to live", SELF_HARM),
        phrase("don't wanna live", SELF_HARM),
        phrase("dont wanna live", SELF_HARM),
        phrase("overdose", SELF_HARM),
        phrase("hurt myself", SELF_HARM),
        phrase("cut myself", SELF_HARM),
        phrase("self harm", SELF_HARM),
        phrase("self-harm", SELF_HARM),
        // Emergency words
        word("911", EMERGENCY),
        phrase("emergency", EMERGENCY),
        phrase("hospital", EMERGENCY),
        word("er", EMERGENCY),
        phrase("police", EMERGENCY),
        phrase("ambulance", EMERGENCY),
    ]
});

/// Pre-compiled Aho-Corasick automaton for all trigger patterns
static PATTERN_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    let patterns: Vec<&str> = TRIGGER_PATTERNS.iter().map(|p| p.pattern).collect();
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .build(&patterns)
        .expect("Failed to build trigger matcher")
});

/// Impulse classes in priority order; the first one that matched wins
const IMPULSE_PRIORITY: [ImpulseType; 4] = [
    ImpulseType::Send,
    ImpulseType::Say,
    ImpulseType::Spend,
    ImpulseType::ShowUp,
];

/// Trigger phrases that fired for one input, for debug logging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationTrace {
    /// Matched phrases in text order
    pub matched_terms: Vec<&'static str>,
}

/// Set of signals found in one input
#[derive(Debug, Default)]
struct Hits {
    families: Vec<Family>,
    impulses: Vec<ImpulseType>,
    flags: RiskFlags,
}

impl Hits {
    fn has(&self, family: Family) -> bool {
        self.families.contains(&family)
    }
}

/// Keyword-based trigger classifier
///
/// Stateless; the pattern table is compiled once per process and shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerClassifier;

impl TriggerClassifier {
    /// Create a classifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify a piece of text
    #[must_use]
    pub fn classify(&self, text: &str) -> TriggerClassification {
        let (classification, trace) = self.classify_with_trace(text);
        debug!(
            matched = ?trace.matched_terms,
            cluster = %classification.emotion_cluster,
            impulse = %classification.impulse_type,
            level = classification.escalation_level.as_u8(),
            "Classified trigger text"
        );
        classification
    }

    /// Classify and report which phrases fired
    #[must_use]
    pub fn classify_with_trace(&self, text: &str) -> (TriggerClassification, ClassificationTrace) {
        let normalized = normalize_input(text);
        let (hits, trace) = scan(&normalized);
        let classification = resolve(&hits, !normalized.is_empty());
        (classification, trace)
    }
}

/// Classify with the process-wide pattern table
#[must_use]
pub fn classify(text: &str) -> TriggerClassification {
    TriggerClassifier::new().classify(text)
}

/// Lowercase, fold typographic apostrophes and collapse whitespace
fn normalize_input(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn scan(normalized: &str) -> (Hits, ClassificationTrace) {
    let mut hits = Hits::default();
    let mut trace = ClassificationTrace::default();

    for m in PATTERN_MATCHER.find_overlapping_iter(normalized) {
        let pattern = &TRIGGER_PATTERNS[m.pattern().as_usize()];
        if pattern.whole_word && !on_word_boundary(normalized, m.start(), m.end()) {
            continue;
        }
        trace.matched_terms.push(pattern.pattern);

        match pattern.signal {
            Signal::Emotion(family) => {
                if !hits.has(family) {
                    hits.families.push(family);
                }
            },
            Signal::Impulse(impulse) => {
                if !hits.impulses.contains(&impulse) {
                    hits.impulses.push(impulse);
                }
                if impulse == ImpulseType::Spend {
                    hits.flags.raise(RiskFlag::MoneyRisk);
                }
            },
            Signal::Flag(flag) => hits.flags.raise(flag),
        }
    }

    (hits, trace)
}

fn resolve(hits: &Hits, has_text: bool) -> TriggerClassification {
    let flags = hits.flags;
    let mut emotion_cluster = resolve_cluster(hits);

    let mut impulse_type = IMPULSE_PRIORITY
        .into_iter()
        .find(|impulse| hits.impulses.contains(impulse))
        .unwrap_or_default();

    let escalation_level = if flags.threatens_life() {
        impulse_type = if flags.self_harm {
            ImpulseType::SelfHarm
        } else {
            ImpulseType::HarmOther
        };
        EscalationLevel::Emergency
    } else if flags.has_situational_risk() {
        EscalationLevel::High
    } else if emotion_cluster.is_activating() {
        EscalationLevel::Medium
    } else {
        EscalationLevel::Low
    };

    if emotion_cluster == EmotionCluster::Unknown && has_text {
        emotion_cluster = EmotionCluster::LowIntensity;
    }

    TriggerClassification {
        emotion_cluster,
        impulse_type,
        escalation_level,
        flags,
    }
}

fn resolve_cluster(hits: &Hits) -> EmotionCluster {
    let mut cluster = EmotionCluster::Unknown;

    if hits.has(Family::Anger) {
        cluster = EmotionCluster::Anger;
    }
    if hits.has(Family::Fear) {
        cluster = if cluster == EmotionCluster::Unknown {
            EmotionCluster::Fear
        } else {
            EmotionCluster::Mixed
        };
    }
    if hits.has(Family::Overwhelm) {
        cluster = if cluster == EmotionCluster::Unknown {
            EmotionCluster::Overwhelm
        } else {
            EmotionCluster::Mixed
        };
    }
    if cluster == EmotionCluster::Unknown {
        if hits.has(Family::Numb) {
            cluster = EmotionCluster::Numb;
        } else if hits.has(Family::Shame) {
            cluster = EmotionCluster::Shame;
        }
    }

    cluster
}
