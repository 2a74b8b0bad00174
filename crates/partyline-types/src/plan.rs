//! The play plan: the director's complete decision for one turn.
//!
//! A [`PlayPlan`] is built once per turn, validated against the schema
//! encoded in the `validator` attributes below, handed to the scheduler, and
//! finally persisted by the store. It is never mutated after assembly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::enums::{
    BeatType, BudgetMode, ContentKind, FallbackMode, LanguageMode, PlanVersion, SafetyCategory,
};
use crate::ids::ParticipantId;
use crate::room::RunningBit;

/// Hard cap on content requests per plan.
pub const MAX_CONTENT_REQUESTS: usize = 4;

/// Hard cap on secondary speakers per plan (everyone but the primary).
pub const MAX_SECONDARY_SPEAKERS: usize = 3;

/// Largest `max_chars` a single content request may ask for.
pub const MAX_REQUEST_CHARS: u32 = 420;

/// A participant cutting in over the primary speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct Interruption {
    /// Who interrupts.
    pub agent: ParticipantId,
    /// Fallback line when no interruption text was generated.
    #[validate(length(min = 1))]
    pub cue: String,
    /// Offset from turn start, in milliseconds.
    pub at_ms: u64,
}

/// A non-verbal reaction narrated alongside the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct Reaction {
    /// Who reacts.
    pub agent: ParticipantId,
    /// What they do (`"gasps"`, `"nods"`, ...).
    #[validate(length(min = 1))]
    pub cue: String,
    /// Offset from turn start, in milliseconds.
    pub at_ms: u64,
}

/// Delivery pacing for the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[validate(schema(function = "validate_delay_window", skip_on_field_errors = false))]
#[ts(export, export_to = "bindings/")]
pub struct Pacing {
    /// Words per minute used to estimate speech duration.
    #[validate(range(min = 1))]
    pub pace_wpm: u32,
    /// Lower bound of the gap between consecutive lines.
    pub micro_delay_ms_min: u64,
    /// Upper bound of the gap between consecutive lines.
    pub micro_delay_ms_max: u64,
}

fn validate_delay_window(pacing: &Pacing) -> Result<(), ValidationError> {
    if pacing.micro_delay_ms_min > pacing.micro_delay_ms_max {
        return Err(ValidationError::new("micro_delay_window_inverted"));
    }
    Ok(())
}

/// A description of one line the content generator must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct ContentRequest {
    /// Unique id within the plan (`full_<agent>`, `quip_<agent>`, ...).
    #[validate(length(min = 1))]
    pub id: String,
    /// Who speaks the line.
    pub agent: ParticipantId,
    /// What kind of line it is.
    pub kind: ContentKind,
    /// Maximum length of the generated line, in characters.
    #[validate(range(min = 1, max = 420))]
    pub max_chars: u32,
    /// Free-form direction for the generator.
    #[validate(length(min = 1))]
    pub style_hint: String,
}

/// Changes the store applies to the room after the turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS, Validate)]
#[ts(export, export_to = "bindings/")]
pub struct StateUpdates {
    /// Added to room energy, then clamped.
    #[validate(range(min = -1.0, max = 1.0))]
    pub energy_delta: f64,
    /// Added to room tension, then clamped.
    #[validate(range(min = -1.0, max = 1.0))]
    pub tension_delta: f64,
    /// New scene topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub topic: Option<String>,
    /// New scene tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tone: Option<String>,
    /// Running bits to insert or refresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    #[validate(nested)]
    pub running_bits_add: Option<Vec<RunningBit>>,
    /// Running bit ids to drop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub running_bits_decay: Option<Vec<String>>,
    /// New language mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub language_mode: Option<LanguageMode>,
    /// New budget mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub budget_mode: Option<BudgetMode>,
}

/// Safety outcome attached to the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SafetyBlock {
    /// Fallback the runtime applies.
    pub fallback_mode_if_flagged: FallbackMode,
    /// Categories detected in the user utterance.
    pub flagged_categories: Vec<SafetyCategory>,
}

/// The director's immutable decision for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Validate)]
#[validate(schema(function = "validate_speaker_roles", skip_on_field_errors = false))]
#[ts(export, export_to = "bindings/")]
pub struct PlayPlan {
    /// Schema version.
    pub version: PlanVersion,
    /// Beat chosen for the turn.
    pub beat_type: BeatType,
    /// Who leads the turn.
    pub primary_speaker: ParticipantId,
    /// Supporting voices, in order; never contains the primary.
    #[validate(length(max = 3))]
    pub secondary_speakers: Vec<ParticipantId>,
    /// Cut-ins, in order.
    #[validate(nested)]
    pub interruptions: Vec<Interruption>,
    /// Narrated reactions, in order.
    #[validate(nested)]
    pub reactions: Vec<Reaction>,
    /// Delivery pacing.
    #[validate(nested)]
    pub pacing: Pacing,
    /// Lines to generate, in order; at most [`MAX_CONTENT_REQUESTS`].
    #[validate(length(max = 4), nested)]
    pub content_requests: Vec<ContentRequest>,
    /// Room changes to apply after the turn.
    #[validate(nested)]
    pub state_updates: StateUpdates,
    /// Safety outcome.
    pub safety: SafetyBlock,
}

fn validate_speaker_roles(plan: &PlayPlan) -> Result<(), ValidationError> {
    if plan.secondary_speakers.contains(&plan.primary_speaker) {
        return Err(ValidationError::new("primary_listed_as_secondary"));
    }
    let mut seen: Vec<ParticipantId> = Vec::with_capacity(plan.secondary_speakers.len());
    for id in &plan.secondary_speakers {
        if seen.contains(id) {
            return Err(ValidationError::new("duplicate_secondary_speaker"));
        }
        seen.push(*id);
    }
    Ok(())
}

impl PlayPlan {
    /// Find the content request of `kind` assigned to `agent`.
    pub fn request_for(&self, agent: ParticipantId, kind: ContentKind) -> Option<&ContentRequest> {
        self.content_requests
            .iter()
            .find(|req| req.agent == agent && req.kind == kind)
    }

    /// Whether the safety screen flagged this turn.
    pub const fn is_flagged(&self) -> bool {
        matches!(
            self.safety.fallback_mode_if_flagged,
            FallbackMode::SingleSpeakerSafe
        )
    }
}
