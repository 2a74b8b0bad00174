//! Speaker allocation: primary, secondaries, and the conflict target.
//!
//! Allocation is driven by a beat-specific preference order, speaking
//! cooldowns, and (for `argument_spike`) the conflict graph. Every sort is
//! stable so ties resolve in registry order.

use partyline_types::{BeatType, Cooldowns, MAX_SECONDARY_SPEAKERS, ParticipantId};

use crate::conflict::ConflictGraph;
use crate::roster::{CALM_PARTICIPANT, Roster};

/// Who speaks this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerAllocation {
    /// Participant leading the turn.
    pub primary: ParticipantId,
    /// Supporting participants, in order; never contains the primary.
    pub secondaries: Vec<ParticipantId>,
    /// Participant the primary provokes (`argument_spike` only).
    pub target: Option<ParticipantId>,
}

/// Beat-specific preference order for the primary speaker.
pub const fn preference_order(beat: BeatType) -> [ParticipantId; 4] {
    use ParticipantId::{Logician, MemeGoblin, MidwestDad, Therapist};
    match beat {
        BeatType::Deescalate | BeatType::StyleReset => [Therapist, Logician, MidwestDad, MemeGoblin],
        BeatType::AnswerUser => [Logician, Therapist, MidwestDad, MemeGoblin],
        BeatType::ArgumentSpike | BeatType::BanterLoop | BeatType::HotTakeRound => {
            [MemeGoblin, MidwestDad, Logician, Therapist]
        }
        BeatType::RoastUserLight
        | BeatType::CallbackBit
        | BeatType::IntroduceNewBit
        | BeatType::TopicPivot => [MidwestDad, Logician, MemeGoblin, Therapist],
    }
}

/// Number of secondaries a beat wants.
pub const fn secondary_count(beat: BeatType) -> usize {
    match beat {
        BeatType::AnswerUser => 1,
        _ => 2,
    }
}

/// Pick the primary speaker.
///
/// The first participant in the beat's preference order with no speaking
/// cooldown wins. When everyone is cooling down, the participant with the
/// lowest cooldown wins, ties in registry order. Returns `None` only when
/// the roster shares no participant with the preference order.
pub fn pick_primary(beat: BeatType, cooldowns: &Cooldowns, roster: &Roster) -> Option<ParticipantId> {
    let ready = preference_order(beat)
        .into_iter()
        .filter(|id| roster.contains(*id))
        .find(|id| cooldowns.speaking_for(*id) == 0);
    ready.or_else(|| roster.ids().min_by_key(|id| cooldowns.speaking_for(*id)))
}

/// Pick up to `count` secondaries: everyone but the primary, ascending by
/// speaking cooldown, ties in registry order.
pub fn pick_secondaries(
    primary: ParticipantId,
    count: usize,
    cooldowns: &Cooldowns,
    roster: &Roster,
) -> Vec<ParticipantId> {
    let mut candidates: Vec<ParticipantId> = roster.ids().filter(|id| *id != primary).collect();
    candidates.sort_by_key(|id| cooldowns.speaking_for(*id));
    candidates.truncate(count.min(MAX_SECONDARY_SPEAKERS));
    candidates
}

/// The non-primary participant with the strictly highest conflict weight
/// against the primary. Ties keep the earliest in registry order.
pub fn pick_target(primary: ParticipantId, roster: &Roster, graph: &ConflictGraph) -> Option<ParticipantId> {
    let mut best: Option<(ParticipantId, f64)> = None;
    for candidate in roster.ids().filter(|id| *id != primary) {
        let weight = graph.weight(primary, candidate);
        match best {
            Some((_, best_weight)) if weight <= best_weight => {}
            _ => best = Some((candidate, weight)),
        }
    }
    best.map(|(id, _)| id)
}

/// Make sure the target is among the secondaries.
///
/// A target already listed stays where it is. Otherwise it is inserted at
/// the front, evicting the last secondary when the list is at `capacity`.
pub fn place_target(secondaries: &mut Vec<ParticipantId>, target: ParticipantId, capacity: usize) {
    if secondaries.contains(&target) {
        return;
    }
    if secondaries.len() >= capacity {
        secondaries.pop();
    }
    secondaries.insert(0, target);
}

/// Allocate speakers for a turn.
///
/// Flagged turns are led by the calming participant alone. Returns `None`
/// only for a roster with no usable participant.
pub fn allocate(
    beat: BeatType,
    flagged: bool,
    cooldowns: &Cooldowns,
    roster: &Roster,
    graph: &ConflictGraph,
) -> Option<SpeakerAllocation> {
    if flagged {
        let primary = if roster.contains(CALM_PARTICIPANT) {
            CALM_PARTICIPANT
        } else {
            pick_primary(BeatType::Deescalate, cooldowns, roster)?
        };
        return Some(SpeakerAllocation {
            primary,
            secondaries: Vec::new(),
            target: None,
        });
    }

    let primary = pick_primary(beat, cooldowns, roster)?;
    let capacity = secondary_count(beat);
    let mut secondaries = pick_secondaries(primary, capacity, cooldowns, roster);

    let target = if beat == BeatType::ArgumentSpike {
        pick_target(primary, roster, graph)
    } else {
        None
    };
    if let Some(target) = target {
        place_target(&mut secondaries, target, capacity);
    }

    Some(SpeakerAllocation {
        primary,
        secondaries,
        target,
    })
}
