//! Beat selection from the shape of the user utterance and the room mood.
//!
//! Rules are evaluated top to bottom; the first match wins.

use partyline_types::{BeatType, SafetyFlags};

use crate::safety::contains_any;

/// Complaints about pacing or tone.
const PACING_COMPLAINTS: &[&str] = &["boring", "too slow", "too ted", "ted talk", "pacing", "tone"];

/// Requests for conflict.
const CONFLICT_INCITEMENTS: &[&str] = &[
    "fight",
    "argue",
    "argument",
    "start an argument",
    "beef",
    "drama",
    "roast",
];

/// Question words that open an interrogative when followed by a space.
const QUESTION_WORDS: &[&str] = &["who", "what", "why", "how", "where", "when"];

/// Tension above which the room is calmed down.
pub const DEESCALATE_TENSION: f64 = 0.72;

/// Energy below which a new bit is introduced.
pub const LOW_ENERGY: f64 = 0.35;

/// Energy below which participants banter.
pub const MODERATE_ENERGY: f64 = 0.55;

/// Tension below which a hot-take round is safe.
pub const CALM_TENSION: f64 = 0.35;

/// Whether the utterance reads as a question.
///
/// True when the trimmed text ends with `?` or begins with a question word
/// followed by a space.
pub fn looks_like_question(text: &str) -> bool {
    let trimmed = text.trim().to_lowercase();
    if trimmed.ends_with('?') {
        return true;
    }
    QUESTION_WORDS.iter().any(|word| {
        trimmed
            .strip_prefix(word)
            .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Pick the beat for this turn.
///
/// A flagged utterance always yields [`BeatType::Deescalate`].
pub fn select_beat(text: &str, safety: &SafetyFlags, energy: f64, tension: f64) -> BeatType {
    if safety.flagged {
        return BeatType::Deescalate;
    }

    let lower = text.to_lowercase();
    if contains_any(&lower, PACING_COMPLAINTS) {
        BeatType::StyleReset
    } else if contains_any(&lower, CONFLICT_INCITEMENTS) {
        BeatType::ArgumentSpike
    } else if looks_like_question(text) {
        BeatType::AnswerUser
    } else if tension > DEESCALATE_TENSION {
        BeatType::Deescalate
    } else if energy < LOW_ENERGY {
        BeatType::IntroduceNewBit
    } else if energy < MODERATE_ENERGY {
        BeatType::BanterLoop
    } else if tension < CALM_TENSION {
        BeatType::HotTakeRound
    } else {
        BeatType::TopicPivot
    }
}
