//! Plan assembly.
//!
//! A [`Director`] turns one user utterance plus the current room snapshot
//! into a [`PlayPlan`]. The [`RuleDirector`] does so with the deterministic
//! heuristics in this crate; other implementations (for example a model
//! backed director) can be swapped in behind the same trait.

use tracing::debug;

use partyline_types::{
    FallbackMode, Pacing, PlanVersion, PlayPlan, RoomState, SafetyBlock, UserPacket,
};

use crate::allocation::allocate;
use crate::beat::select_beat;
use crate::conflict::ConflictGraph;
use crate::cues::{build_interruptions, build_reactions};
use crate::error::DirectorError;
use crate::requests::{
    append_interruption_requests, build_content_requests, interruption_requests, quip_agents,
};
use crate::roster::Roster;
use crate::safety::screen;
use crate::state_updates::compute_state_updates;

/// Default lower bound of the gap between lines, in milliseconds.
pub const DEFAULT_MICRO_DELAY_MS_MIN: u64 = 90;

/// Default upper bound of the gap between lines, in milliseconds.
pub const DEFAULT_MICRO_DELAY_MS_MAX: u64 = 320;

/// A source of play plans.
pub trait Director {
    /// Plan one turn.
    ///
    /// The room state is read-only here; the store applies the plan's
    /// state updates after the turn has been delivered.
    ///
    /// # Errors
    ///
    /// Returns [`DirectorError`] when no plan can be produced.
    fn plan_turn(&self, packet: &UserPacket, room: &RoomState) -> Result<PlayPlan, DirectorError>;
}

/// Heuristic director over a fixed roster and conflict graph.
#[derive(Debug, Clone)]
pub struct RuleDirector {
    roster: Roster,
    graph: ConflictGraph,
    micro_delay_ms_min: u64,
    micro_delay_ms_max: u64,
}

impl RuleDirector {
    /// Create a director with the default micro-delay window.
    pub const fn new(roster: Roster, graph: ConflictGraph) -> Self {
        Self {
            roster,
            graph,
            micro_delay_ms_min: DEFAULT_MICRO_DELAY_MS_MIN,
            micro_delay_ms_max: DEFAULT_MICRO_DELAY_MS_MAX,
        }
    }

    /// Override the gap window written into every plan's pacing.
    ///
    /// An inverted window is swapped rather than rejected.
    #[must_use]
    pub const fn with_micro_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms {
            self.micro_delay_ms_min = min_ms;
            self.micro_delay_ms_max = max_ms;
        } else {
            self.micro_delay_ms_min = max_ms;
            self.micro_delay_ms_max = min_ms;
        }
        self
    }

    /// The participants this director plans for.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The conflict graph this director plans with.
    pub const fn graph(&self) -> &ConflictGraph {
        &self.graph
    }
}

impl Default for RuleDirector {
    fn default() -> Self {
        Self::new(Roster::default(), ConflictGraph::default())
    }
}

impl Director for RuleDirector {
    fn plan_turn(&self, packet: &UserPacket, room: &RoomState) -> Result<PlayPlan, DirectorError> {
        let flags = screen(&packet.text);
        let beat = select_beat(&packet.text, &flags, room.energy, room.tension);
        let next_turn = room.next_turn_index();

        let allocation = allocate(beat, flags.flagged, &room.cooldowns, &self.roster, &self.graph)
            .ok_or(DirectorError::EmptyRoster)?;
        debug!(
            turn = next_turn,
            beat = %beat,
            primary = %allocation.primary,
            secondaries = ?allocation.secondaries,
            target = ?allocation.target,
            flagged = flags.flagged,
            "speakers allocated"
        );

        let mut content_requests = build_content_requests(beat, &allocation, room.budget_mode);

        let (interruptions, reactions) = if flags.flagged {
            (Vec::new(), Vec::new())
        } else {
            let quippers = quip_agents(&content_requests);
            let interruptions =
                build_interruptions(beat, &allocation, &quippers, &self.roster, &self.graph);
            (interruptions, build_reactions(beat, &allocation))
        };

        if !interruptions.is_empty() {
            let extra = interruption_requests(&interruptions, next_turn);
            append_interruption_requests(&mut content_requests, extra);
        }
        debug!(
            turn = next_turn,
            requests = content_requests.len(),
            interruptions = interruptions.len(),
            reactions = reactions.len(),
            "content budgeted"
        );

        let fallback_mode_if_flagged = if flags.flagged {
            FallbackMode::SingleSpeakerSafe
        } else {
            FallbackMode::None
        };

        Ok(PlayPlan {
            version: PlanVersion::V1,
            beat_type: beat,
            primary_speaker: allocation.primary,
            secondary_speakers: allocation.secondaries,
            interruptions,
            reactions,
            pacing: Pacing {
                pace_wpm: room.pace_wpm_target,
                micro_delay_ms_min: self.micro_delay_ms_min,
                micro_delay_ms_max: self.micro_delay_ms_max,
            },
            content_requests,
            state_updates: compute_state_updates(beat, &packet.text, next_turn),
            safety: SafetyBlock {
                fallback_mode_if_flagged,
                flagged_categories: flags.categories,
            },
        })
    }
}
