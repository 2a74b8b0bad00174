//! Participants, room state, and the user packet.
//!
//! [`RoomState`] is the single mutable snapshot of a room. It is owned by the
//! store and handed to the director read-only once per turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::enums::{BudgetMode, LanguageMode, SafetyCategory};
use crate::ids::ParticipantId;

/// Maximum number of entries kept in [`RoomState::recent_speakers`].
pub const RECENT_SPEAKERS_CAPACITY: usize = 6;

/// Default conversational pace in words per minute.
pub const DEFAULT_PACE_WPM: u32 = 155;

/// Clamp a value into the unit interval `[0, 1]`.
///
/// `NaN` collapses to `0.0` so a bad delta can never poison the room.
pub const fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// Immutable persona definition for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Participant {
    /// Participant identity.
    pub id: ParticipantId,
    /// Human-readable name.
    pub display_name: String,
    /// Baseline profanity level in `[0, 1]`.
    pub profanity_level: f64,
    /// Style rules handed to the content generator.
    pub style_rules: Vec<String>,
    /// Topics the persona never touches.
    pub taboos: Vec<String>,
}

// ---------------------------------------------------------------------------
// Room state
// ---------------------------------------------------------------------------

/// A recurring callback joke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct RunningBit {
    /// Stable key of the bit.
    pub bit_id: String,
    /// How strong the bit currently is, in `[0, 1]`.
    #[validate(range(min = 0.0, max = 1.0))]
    pub strength: f64,
    /// Turn index at which the bit was last used.
    pub last_used_turn: u64,
}

/// Topic and tone of the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Scene {
    /// What the room is talking about.
    pub topic: String,
    /// How the room is talking about it.
    pub tone: String,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            topic: String::from("getting to know each other"),
            tone: String::from("playful"),
        }
    }
}

/// Per-participant cooldown counters, in turns.
///
/// Counters are unsigned and only ever decremented with saturation, so they
/// can never go negative. A participant without an entry has cooldown 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cooldowns {
    /// Turns before the participant may lead again.
    pub speaking: BTreeMap<ParticipantId, u32>,
    /// Turns before the participant may interrupt again.
    pub interrupt: BTreeMap<ParticipantId, u32>,
}

impl Cooldowns {
    /// Speaking cooldown of a participant (0 when unknown).
    pub fn speaking_for(&self, id: ParticipantId) -> u32 {
        self.speaking.get(&id).copied().unwrap_or(0)
    }

    /// Interrupt cooldown of a participant (0 when unknown).
    pub fn interrupt_for(&self, id: ParticipantId) -> u32 {
        self.interrupt.get(&id).copied().unwrap_or(0)
    }
}

impl Default for Cooldowns {
    fn default() -> Self {
        let zeroed: BTreeMap<ParticipantId, u32> =
            ParticipantId::ALL.into_iter().map(|id| (id, 0)).collect();
        Self {
            speaking: zeroed.clone(),
            interrupt: zeroed,
        }
    }
}

/// Compact memory of who did what last turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LastTurnsDigest {
    /// Last participant to hold the floor.
    pub last_speaker: Option<ParticipantId>,
    /// Primary speaker of the previous turn.
    pub last_primary_agent: Option<ParticipantId>,
    /// Participant that interrupted during the previous turn.
    pub last_interrupt_agent: Option<ParticipantId>,
}

/// Mutable per-room snapshot.
///
/// Energy and tension are kept in `[0, 1]` by the store; `turn_index` only
/// ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoomState {
    /// Number of turns applied so far.
    pub turn_index: u64,
    /// Current topic and tone.
    pub scene: Scene,
    /// Room energy in `[0, 1]`.
    pub energy: f64,
    /// Room tension in `[0, 1]`.
    pub tension: f64,
    /// Target delivery pace in words per minute.
    pub pace_wpm_target: u32,
    /// Running bits in insertion order.
    pub running_bits: Vec<RunningBit>,
    /// Who spoke and interrupted last turn.
    pub last_turns_digest: LastTurnsDigest,
    /// Content budget.
    pub budget_mode: BudgetMode,
    /// Speaking and interrupt cooldowns.
    pub cooldowns: Cooldowns,
    /// Most recent speakers, newest first, at most
    /// [`RECENT_SPEAKERS_CAPACITY`] entries.
    pub recent_speakers: Vec<ParticipantId>,
    /// Profanity tolerance.
    pub language_mode: LanguageMode,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            turn_index: 0,
            scene: Scene::default(),
            energy: 0.55,
            tension: 0.2,
            pace_wpm_target: DEFAULT_PACE_WPM,
            running_bits: Vec::new(),
            last_turns_digest: LastTurnsDigest::default(),
            budget_mode: BudgetMode::Normal,
            cooldowns: Cooldowns::default(),
            recent_speakers: Vec::new(),
            language_mode: LanguageMode::Normal,
        }
    }
}

impl RoomState {
    /// Index of the turn currently being planned.
    pub const fn next_turn_index(&self) -> u64 {
        self.turn_index.saturating_add(1)
    }
}

// ---------------------------------------------------------------------------
// Input and screening
// ---------------------------------------------------------------------------

/// One user utterance entering the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserPacket {
    /// Who said it.
    pub user_id: String,
    /// What they said.
    pub text: String,
}

/// Result of screening an utterance for taboo content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SafetyFlags {
    /// `true` iff at least one category matched.
    pub flagged: bool,
    /// Matched categories in detection order.
    pub categories: Vec<SafetyCategory>,
}

impl SafetyFlags {
    /// Build flags from the matched categories.
    pub fn from_categories(categories: Vec<SafetyCategory>) -> Self {
        Self {
            flagged: !categories.is_empty(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_room_matches_template() {
        let room = RoomState::default();
        assert_eq!(room.turn_index, 0);
        assert_eq!(room.scene.topic, "getting to know each other");
        assert_eq!(room.scene.tone, "playful");
        assert_eq!(room.pace_wpm_target, 155);
        assert!(room.running_bits.is_empty());
        assert!(room.recent_speakers.is_empty());
        for id in ParticipantId::ALL {
            assert_eq!(room.cooldowns.speaking_for(id), 0);
            assert_eq!(room.cooldowns.interrupt_for(id), 0);
        }
    }

    #[test]
    fn clamp_unit_bounds() {
        assert!((clamp_unit(1.4) - 1.0).abs() < f64::EPSILON);
        assert!(clamp_unit(-0.3).abs() < f64::EPSILON);
        assert!((clamp_unit(0.42) - 0.42).abs() < f64::EPSILON);
        assert!(clamp_unit(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn room_state_json_uses_snake_case_keys() {
        let json = serde_json::to_value(RoomState::default()).ok();
        let json = json.unwrap_or_default();
        assert_eq!(json["cooldowns"]["speaking"]["meme_goblin"], 0);
        assert_eq!(json["budget_mode"], "normal");
        assert_eq!(json["language_mode"], "normal");
    }
}
