//! Enumeration types shared by the director, runtime, and store.
//!
//! Every enum serializes as `snake_case` so the JSON wire format matches the
//! play plan schema consumed by clients.

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Beats
// ---------------------------------------------------------------------------

/// The categorical shape of one conversational turn.
///
/// The beat decides who speaks, how much content is requested, which
/// reactions fire, and how energy and tension move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BeatType {
    /// Respond directly to a user question.
    AnswerUser,
    /// The user complained about pacing or tone; tighten up.
    StyleReset,
    /// Light back-and-forth between participants.
    BanterLoop,
    /// Deliberately provoke a disagreement between two participants.
    ArgumentSpike,
    /// Tease the user, gently.
    RoastUserLight,
    /// Everyone drops a hot take.
    HotTakeRound,
    /// Bring back a running bit.
    CallbackBit,
    /// Start a new running bit.
    IntroduceNewBit,
    /// Calm the room down.
    Deescalate,
    /// Change the subject.
    TopicPivot,
}

impl BeatType {
    /// Wire name of the beat, used verbatim in style hints.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnswerUser => "answer_user",
            Self::StyleReset => "style_reset",
            Self::BanterLoop => "banter_loop",
            Self::ArgumentSpike => "argument_spike",
            Self::RoastUserLight => "roast_user_light",
            Self::HotTakeRound => "hot_take_round",
            Self::CallbackBit => "callback_bit",
            Self::IntroduceNewBit => "introduce_new_bit",
            Self::Deescalate => "deescalate",
            Self::TopicPivot => "topic_pivot",
        }
    }
}

impl fmt::Display for BeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// What kind of line a content request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ContentKind {
    /// The primary speaker's main reply.
    FullReply,
    /// A short supporting line from a secondary speaker.
    Quip,
    /// A closing one-liner.
    Tagline,
    /// A cut-in line spoken over the primary speaker.
    Interruption,
}

// ---------------------------------------------------------------------------
// Room modes
// ---------------------------------------------------------------------------

/// How much profanity the room tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LanguageMode {
    /// Profanity capped low regardless of persona.
    Clean,
    /// Persona defaults apply.
    #[default]
    Normal,
    /// Anything the persona would say.
    Spicy,
}

/// How much text the room is allowed to request per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BudgetMode {
    /// Full-length replies and quips.
    #[default]
    Normal,
    /// Shortened replies and quips.
    Frugal,
}

// ---------------------------------------------------------------------------
// Safety
// ---------------------------------------------------------------------------

/// A taboo category detected in the user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SafetyCategory {
    /// Slurs or hateful language.
    SlurOrHate,
    /// Self-harm or suicide.
    SelfHarm,
    /// Violence or threats.
    Violence,
    /// Sexually explicit content.
    ExplicitSexual,
}

/// The fallback the runtime applies when the utterance was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FallbackMode {
    /// Nothing flagged; normal play.
    #[default]
    None,
    /// Only the calming participant speaks.
    SingleSpeakerSafe,
}

// ---------------------------------------------------------------------------
// Plan version
// ---------------------------------------------------------------------------

/// Schema version of a play plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PlanVersion {
    /// Version `1.0`.
    #[default]
    #[serde(rename = "1.0")]
    V1,
}
