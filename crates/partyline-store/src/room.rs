//! The single-room state store.
//!
//! [`apply_plan`] is the pure state transition; [`RoomStore`] wraps it with
//! ownership of the current state and the optional turn log. The new state
//! is only committed once its log line has been written, so a failed write
//! leaves the room exactly as it was.

use tracing::{debug, info};

use partyline_types::{PlayPlan, RECENT_SPEAKERS_CAPACITY, RoomState, TranscriptEvent, clamp_unit};

use crate::error::StoreError;
use crate::log::{TurnLog, TurnLogEntry};

/// Turns the primary speaker sits out after leading.
pub const SPEAKING_COOLDOWN_TURNS: u32 = 2;

/// Turns an interrupter waits before cutting in again.
pub const INTERRUPT_COOLDOWN_TURNS: u32 = 2;

/// Compute the room state after `plan` has been delivered.
pub fn apply_plan(state: &RoomState, plan: &PlayPlan) -> RoomState {
    let mut next = state.clone();
    let updates = &plan.state_updates;

    next.turn_index = next.turn_index.saturating_add(1);
    next.energy = clamp_unit(next.energy + updates.energy_delta);
    next.tension = clamp_unit(next.tension + updates.tension_delta);

    if let Some(topic) = &updates.topic {
        next.scene.topic.clone_from(topic);
    }
    if let Some(tone) = &updates.tone {
        next.scene.tone.clone_from(tone);
    }
    if let Some(mode) = updates.language_mode {
        next.language_mode = mode;
    }
    if let Some(mode) = updates.budget_mode {
        next.budget_mode = mode;
    }

    for bit in updates.running_bits_add.iter().flatten() {
        match next.running_bits.iter_mut().find(|b| b.bit_id == bit.bit_id) {
            Some(existing) => {
                existing.strength = clamp_unit(bit.strength);
                existing.last_used_turn = bit.last_used_turn;
            }
            None => next.running_bits.push(bit.clone()),
        }
    }
    if let Some(decayed) = &updates.running_bits_decay {
        next.running_bits.retain(|b| !decayed.contains(&b.bit_id));
    }

    for turns in next
        .cooldowns
        .speaking
        .values_mut()
        .chain(next.cooldowns.interrupt.values_mut())
    {
        *turns = turns.saturating_sub(1);
    }
    next.cooldowns
        .speaking
        .insert(plan.primary_speaker, SPEAKING_COOLDOWN_TURNS);
    for interruption in &plan.interruptions {
        next.cooldowns
            .interrupt
            .insert(interruption.agent, INTERRUPT_COOLDOWN_TURNS);
    }

    next.recent_speakers = std::iter::once(plan.primary_speaker)
        .chain(plan.secondary_speakers.iter().copied())
        .take(RECENT_SPEAKERS_CAPACITY)
        .collect();

    next.last_turns_digest.last_speaker = Some(plan.primary_speaker);
    next.last_turns_digest.last_primary_agent = Some(plan.primary_speaker);
    next.last_turns_digest.last_interrupt_agent = plan.interruptions.first().map(|i| i.agent);

    next
}

/// Owner of the room state.
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    state: RoomState,
    log: Option<TurnLog>,
}

impl RoomStore {
    /// Create a store holding the default room and no log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every applied turn to `log`.
    #[must_use]
    pub fn with_log(mut self, log: TurnLog) -> Self {
        self.log = Some(log);
        self
    }

    /// The current room state.
    pub const fn state(&self) -> &RoomState {
        &self.state
    }

    /// The turn log, if one is configured.
    pub const fn log(&self) -> Option<&TurnLog> {
        self.log.as_ref()
    }

    /// Apply a delivered turn and log it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the log line cannot be written; the room
    /// state is left unchanged.
    pub async fn apply_turn(
        &mut self,
        plan: &PlayPlan,
        transcript: &[TranscriptEvent],
    ) -> Result<RoomState, StoreError> {
        let next = apply_plan(&self.state, plan);

        if let Some(log) = &self.log {
            let entry = TurnLogEntry::new(plan.clone(), transcript.to_vec(), next.clone());
            log.append(&entry).await?;
            debug!(turn_id = %entry.turn_id, path = %log.path().display(), "turn logged");
        }

        info!(
            turn = next.turn_index,
            beat = %plan.beat_type,
            primary = %plan.primary_speaker,
            energy = next.energy,
            tension = next.tension,
            "turn applied"
        );
        self.state = next;
        Ok(self.state.clone())
    }

    /// Restore the default room.
    pub fn reset(&mut self) -> RoomState {
        self.state = RoomState::default();
        info!("room reset");
        self.state.clone()
    }
}
