//! Lane script table
//!
//! Read-only content the playbook engine assembles responses from: an intro
//! line per tone and an ordered list of steps for every lane, plus an optional
//! acknowledgement opener per emotion cluster. The built-in table is complete;
//! tables loaded from disk may leave lanes out and fill them from another table.

use domain::{DomainError, EmotionCluster, Lane, PlaybookStep, StepEmphasis, Tone};
use serde::{Deserialize, Serialize};

/// Intro line for each tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneLines {
    pub gentle: String,
    pub direct: String,
    pub playful: String,
    pub firm: String,
}

impl ToneLines {
    /// Line for a tone
    #[must_use]
    pub fn get(&self, tone: Tone) -> &str {
        match tone {
            Tone::Gentle => &self.gentle,
            Tone::Direct => &self.direct,
            Tone::Playful => &self.playful,
            Tone::Firm => &self.firm,
        }
    }

    fn new(gentle: &str, direct: &str, playful: &str, firm: &str) -> Self {
        Self {
            gentle: gentle.to_string(),
            direct: direct.to_string(),
            playful: playful.to_string(),
            firm: firm.to_string(),
        }
    }
}

/// Content for one lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneScript {
    pub intro: ToneLines,
    #[serde(default)]
    pub steps: Vec<PlaybookStep>,
}

/// Lane scripts keyed by lane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneScripts {
    pub grounding: Option<LaneScript>,
    pub decision_pause: Option<LaneScript>,
    pub conflict: Option<LaneScript>,
    pub money: Option<LaneScript>,
    pub work: Option<LaneScript>,
    pub relationship: Option<LaneScript>,
    pub emergency: Option<LaneScript>,
}

impl LaneScripts {
    /// Script for a lane, if configured
    #[must_use]
    pub fn get(&self, lane: Lane) -> Option<&LaneScript> {
        match lane {
            Lane::Grounding => self.grounding.as_ref(),
            Lane::DecisionPause => self.decision_pause.as_ref(),
            Lane::Conflict => self.conflict.as_ref(),
            Lane::Money => self.money.as_ref(),
            Lane::Work => self.work.as_ref(),
            Lane::Relationship => self.relationship.as_ref(),
            Lane::Emergency => self.emergency.as_ref(),
        }
    }

    /// Replace the script for a lane
    pub fn set(&mut self, lane: Lane, script: LaneScript) {
        *self.slot_mut(lane) = Some(script);
    }

    fn slot_mut(&mut self, lane: Lane) -> &mut Option<LaneScript> {
        match lane {
            Lane::Grounding => &mut self.grounding,
            Lane::DecisionPause => &mut self.decision_pause,
            Lane::Conflict => &mut self.conflict,
            Lane::Money => &mut self.money,
            Lane::Work => &mut self.work,
            Lane::Relationship => &mut self.relationship,
            Lane::Emergency => &mut self.emergency,
        }
    }
}

/// Acknowledgement openers keyed by emotion cluster
///
/// `unknown` has no slot: there is nothing to acknowledge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionOpeners {
    pub anger: Option<String>,
    pub fear: Option<String>,
    pub sadness: Option<String>,
    pub shame: Option<String>,
    pub overwhelm: Option<String>,
    pub numb: Option<String>,
    pub mixed: Option<String>,
    pub low_intensity: Option<String>,
}

impl EmotionOpeners {
    /// Opener for a cluster, if configured
    #[must_use]
    pub fn get(&self, cluster: EmotionCluster) -> Option<&str> {
        let slot = match cluster {
            EmotionCluster::Anger => &self.anger,
            EmotionCluster::Fear => &self.fear,
            EmotionCluster::Sadness => &self.sadness,
            EmotionCluster::Shame => &self.shame,
            EmotionCluster::Overwhelm => &self.overwhelm,
            EmotionCluster::Numb => &self.numb,
            EmotionCluster::Mixed => &self.mixed,
            EmotionCluster::LowIntensity => &self.low_intensity,
            EmotionCluster::Unknown => return None,
        };
        slot.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn fill_missing_from(&mut self, base: &Self) {
        let pairs = [
            (&mut self.anger, &base.anger),
            (&mut self.fear, &base.fear),
            (&mut self.sadness, &base.sadness),
            (&mut self.shame, &base.shame),
            (&mut self.overwhelm, &base.overwhelm),
            (&mut self.numb, &base.numb),
            (&mut self.mixed, &base.mixed),
            (&mut self.low_intensity, &base.low_intensity),
        ];
        for (slot, fallback) in pairs {
            if slot.is_none() {
                slot.clone_from(fallback);
            }
        }
    }
}

/// Complete response content for the playbook engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTable {
    #[serde(default)]
    pub lanes: LaneScripts,
    #[serde(default)]
    pub openers: EmotionOpeners,
}

impl Default for ScriptTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScriptTable {
    /// Table with no content; every lane falls back to the generic steps
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lanes: LaneScripts::default(),
            openers: EmotionOpeners::default(),
        }
    }

    /// Script for a lane, if configured
    #[must_use]
    pub fn lane(&self, lane: Lane) -> Option<&LaneScript> {
        self.lanes.get(lane)
    }

    /// Opener for an emotion cluster, if configured
    #[must_use]
    pub fn opener(&self, cluster: EmotionCluster) -> Option<&str> {
        self.openers.get(cluster)
    }

    /// Builder-style lane replacement
    #[must_use]
    pub fn with_lane(mut self, lane: Lane, script: LaneScript) -> Self {
        self.lanes.set(lane, script);
        self
    }

    /// Lanes with no script
    #[must_use]
    pub fn missing_lanes(&self) -> Vec<Lane> {
        Lane::all()
            .into_iter()
            .filter(|lane| self.lane(*lane).is_none())
            .collect()
    }

    /// Fill lanes and openers this table leaves out from `base`
    #[must_use]
    pub fn fill_missing_from(mut self, base: &Self) -> Self {
        for lane in self.missing_lanes() {
            if let Some(script) = base.lane(lane) {
                self.lanes.set(lane, script.clone());
            }
        }
        self.openers.fill_missing_from(&base.openers);
        self
    }

    /// Reject blank intro lines and blank steps
    pub fn validate(&self) -> Result<(), DomainError> {
        for lane in Lane::all() {
            let Some(script) = self.lane(lane) else {
                continue;
            };
            for tone in Tone::all() {
                if script.intro.get(tone).trim().is_empty() {
                    return Err(DomainError::ValidationError(format!(
                        "lane '{lane}' has a blank {tone} intro"
                    )));
                }
            }
            if let Some(index) = script.steps.iter().position(|s| s.text.trim().is_empty()) {
                return Err(DomainError::ValidationError(format!(
                    "lane '{lane}' step {} is blank",
                    index + 1
                )));
            }
        }
        Ok(())
    }

    /// Built-in content covering every lane
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        use StepEmphasis::{Calm, Normalize, Plan, Warning};

        let step = PlaybookStep::new;
        let mut lanes = LaneScripts::default();

        lanes.set(
            Lane::Grounding,
            LaneScript {
                intro: ToneLines::new(
                    "Let's slow this moment down together, one breath at a time.",
                    "First job: get your body out of alarm mode. Decisions come after.",
                    "Quick pit stop for your nervous system. No decisions at full speed.",
                    "Stop for a moment. Nothing needs to happen in the next few minutes except breathing.",
                ),
                steps: vec![
                    step(
                        "Breathe in for 4 counts, hold for 4, and breathe out for 6. Do it three times.",
                        Calm,
                    ),
                    step(
                        "Press your feet into the floor and name five things you can see around you.",
                        Calm,
                    ),
                    step(
                        "This wave is real and it will pass. You don't have to solve anything while it's this loud.",
                        Normalize,
                    ),
                    step(
                        "When your breathing slows, pick one small next thing: water, a short walk, or a message to someone safe.",
                        Plan,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::DecisionPause,
            LaneScript {
                intro: ToneLines::new(
                    "It makes sense to want to say something right now. Let's give it a little space first.",
                    "Don't send anything yet. Messages sent at peak emotion are the ones people regret.",
                    "Your thumbs are faster than your future self right now. Let's let them catch up.",
                    "Do not send or say it yet. Put the phone down first.",
                ),
                steps: vec![
                    step(
                        "Pause before sending anything. Put the phone face down and wait at least 20 minutes.",
                        Warning,
                    ),
                    step(
                        "Take three slow breaths with your hands away from the screen.",
                        Calm,
                    ),
                    step(
                        "If you still want to say it later, write it in your notes app first, not in the chat.",
                        Plan,
                    ),
                    step(
                        "Wanting to be heard right now is normal. How and when you say it is still up to you.",
                        Normalize,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::Conflict,
            LaneScript {
                intro: ToneLines::new(
                    "Wanting to deal with this face to face is understandable. Let's keep you steady first.",
                    "Going over there right now is the move most likely to make this worse.",
                    "Plot twist: the most powerful move right now is staying put.",
                    "Stay where you are. Showing up right now is not the move.",
                ),
                steps: vec![
                    step(
                        "Stay where you are. Do not drive over, pull up, or go find them right now.",
                        Warning,
                    ),
                    step(
                        "Put physical distance between you and the situation: another room, outside, or a walk around the block.",
                        Calm,
                    ),
                    step(
                        "Pick a time a few hours from now when you'll decide whether to talk, and how.",
                        Plan,
                    ),
                    step(
                        "Wanting to settle this in person makes sense. Doing it while this activated rarely goes the way you want.",
                        Normalize,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::Money,
            LaneScript {
                intro: ToneLines::new(
                    "Spending can feel like relief in a moment like this. Let's give your wallet some breathing room.",
                    "This purchase can wait 24 hours. If it's right, it will still be right tomorrow.",
                    "Your card deserves a nap. Let's close the checkout before it closes on you.",
                    "Do not buy, bet, or swipe anything right now.",
                ),
                steps: vec![
                    step(
                        "Close the app, the tab, or the checkout page before anything else.",
                        Warning,
                    ),
                    step(
                        "Set a 24-hour rule: if you still want it tomorrow, you can revisit it with a clear head.",
                        Plan,
                    ),
                    step(
                        "Take three slow breaths and notice what this purchase is supposed to fix right now.",
                        Calm,
                    ),
                    step(
                        "Reaching for relief through spending is common. It doesn't make you bad with money.",
                        Normalize,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::Work,
            LaneScript {
                intro: ToneLines::new(
                    "Work pushed you hard today. Let's protect tomorrow-you before anything gets decided.",
                    "Don't make a career decision in the heat of this moment.",
                    "Dramatic exits look great in movies and cost a lot in real life. Let's skip the scene.",
                    "Do not quit, walk out, or message your boss right now.",
                ),
                steps: vec![
                    step(
                        "Don't quit, walk out, or send that email right now. Nothing at work needs a reply in the next hour.",
                        Warning,
                    ),
                    step(
                        "Step away for a few minutes: bathroom, stairwell, or outside.",
                        Calm,
                    ),
                    step(
                        "Write down what happened and what you'd want to change, to look at tomorrow.",
                        Plan,
                    ),
                    step(
                        "Feeling pushed to the edge at work is real. Tomorrow's decision will serve you better than tonight's.",
                        Normalize,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::Relationship,
            LaneScript {
                intro: ToneLines::new(
                    "This clearly matters to you. Let's not make a big relationship move while it hurts this much.",
                    "Big relationship decisions made at peak emotion are hard to undo. Hold off tonight.",
                    "Your heart is driving and it doesn't have a license right now. Let's pull over.",
                    "Do not make any relationship move tonight.",
                ),
                steps: vec![
                    step(
                        "Hold off on any big move tonight: no breakups, no ultimatums, no going home with someone to make a point.",
                        Warning,
                    ),
                    step(
                        "Put the phone out of reach and take a few slow breaths.",
                        Calm,
                    ),
                    step(
                        "Write down what you're feeling and what you actually need from this person.",
                        Plan,
                    ),
                    step(
                        "Hurt this deep usually means this matters. That's worth protecting from a rushed decision.",
                        Normalize,
                    ),
                ],
            },
        );

        lanes.set(
            Lane::Emergency,
            LaneScript {
                intro: ToneLines::new(
                    "I'm really glad you said this out loud. Your safety matters more than anything else right now.",
                    "Your safety comes first. Here is what to do right now.",
                    "I'm really glad you told me. Your safety matters more than anything right now.",
                    "Your safety comes first. Follow these steps right now.",
                ),
                steps: vec![
                    step(
                        "Stay with the person you reached, or stay on the line, until the urge eases.",
                        Plan,
                    ),
                    step(
                        "Breathe slowly. You don't have to figure anything else out right now.",
                        Calm,
                    ),
                ],
            },
        );

        let openers = EmotionOpeners {
            anger: Some("That sounds like a lot of anger, and it's okay to feel it.".to_string()),
            fear: Some("It sounds like your body is on high alert right now.".to_string()),
            sadness: Some("It sounds like this really hurts.".to_string()),
            shame: Some("Feeling this exposed is painful, and it doesn't define you.".to_string()),
            overwhelm: Some("It sounds like everything is landing on you at once.".to_string()),
            numb: Some("Feeling shut down or empty is a real response, not a failure.".to_string()),
            mixed: Some("It sounds like a lot of feelings are hitting at the same time.".to_string()),
            low_intensity: Some("Thanks for putting this into words.".to_string()),
        };

        Self { lanes, openers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_lane() {
        let table = ScriptTable::builtin();
        assert!(table.missing_lanes().is_empty());
        for lane in Lane::all() {
            assert!(table.lane(lane).is_some_and(|s| s.steps.len() >= 2), "{lane}");
        }
    }

    #[test]
    fn builtin_is_valid() {
        assert!(ScriptTable::builtin().validate().is_ok());
    }

    #[test]
    fn default_is_builtin() {
        assert_eq!(ScriptTable::default(), ScriptTable::builtin());
    }

    #[test]
    fn empty_table_misses_all_lanes() {
        assert_eq!(ScriptTable::empty().missing_lanes().len(), Lane::all().len());
    }

    #[test]
    fn unknown_cluster_has_no_opener() {
        assert!(ScriptTable::builtin().opener(EmotionCluster::Unknown).is_none());
        assert!(ScriptTable::builtin().opener(EmotionCluster::Anger).is_some());
    }

    #[test]
    fn blank_opener_is_treated_as_missing() {
        let mut table = ScriptTable::empty();
        table.openers.anger = Some("  ".to_string());
        assert!(table.opener(EmotionCluster::Anger).is_none());
    }

    #[test]
    fn tone_lines_select_by_tone() {
        let lines = ToneLines::new("g", "d", "p", "f");
        assert_eq!(lines.get(Tone::Gentle), "g");
        assert_eq!(lines.get(Tone::Direct), "d");
        assert_eq!(lines.get(Tone::Playful), "p");
        assert_eq!(lines.get(Tone::Firm), "f");
    }

    #[test]
    fn fill_missing_keeps_own_lanes() {
        let custom = LaneScript {
            intro: ToneLines::new("a", "b", "c", "d"),
            steps: vec![PlaybookStep::new("only", StepEmphasis::Plan)],
        };
        let table = ScriptTable::empty()
            .with_lane(Lane::Money, custom.clone())
            .fill_missing_from(&ScriptTable::builtin());

        assert_eq!(table.lane(Lane::Money), Some(&custom));
        assert_eq!(
            table.lane(Lane::Work),
            ScriptTable::builtin().lane(Lane::Work)
        );
        assert!(table.opener(EmotionCluster::Fear).is_some());
    }

    #[test]
    fn validate_rejects_blank_intro() {
        let script = LaneScript {
            intro: ToneLines::new("a", "", "c", "d"),
            steps: vec![],
        };
        let err = ScriptTable::empty()
            .with_lane(Lane::Work, script)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("direct"));
    }

    #[test]
    fn validate_rejects_blank_step() {
        let script = LaneScript {
            intro: ToneLines::new("a", "b", "c", "d"),
            steps: vec![
                PlaybookStep::new("ok", StepEmphasis::Calm),
                PlaybookStep::new(" ", StepEmphasis::Calm),
            ],
        };
        let err = ScriptTable::empty()
            .with_lane(Lane::Grounding, script)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("step 2"));
    }

    #[test]
    fn deserializes_partial_table() {
        let json = r#"{
            "lanes": {
                "money": {
                    "intro": {"gentle": "g", "direct": "d", "playful": "p", "firm": "f"},
                    "steps": [{"text": "Close the tab.", "emphasis": "warning"}, {"text": "Wait."}]
                }
            }
        }"#;
        let table: ScriptTable = serde_json::from_str(json).unwrap();
        let money = table.lane(Lane::Money).unwrap();
        assert_eq!(money.steps[0].emphasis, StepEmphasis::Warning);
        assert_eq!(money.steps[1].emphasis, StepEmphasis::Calm);
        assert!(table.lane(Lane::Work).is_none());
    }
}
