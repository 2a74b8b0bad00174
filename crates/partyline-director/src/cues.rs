//! Ambient reactions and cut-in interruptions.

use partyline_types::{BeatType, Interruption, ParticipantId, Reaction};

use crate::allocation::SpeakerAllocation;
use crate::conflict::ConflictGraph;
use crate::roster::Roster;

/// Offset of the first reaction, in milliseconds.
pub const REACTION_BASE_MS: u64 = 140;

/// Gap between consecutive reactions, in milliseconds.
pub const REACTION_STEP_MS: u64 = 160;

/// Offset of an interruption, in milliseconds.
pub const INTERRUPTION_BASE_MS: u64 = 280;

/// Reaction vocabulary of a beat, in firing order.
pub const fn reaction_cues(beat: BeatType) -> &'static [&'static str] {
    match beat {
        BeatType::AnswerUser => &["nods"],
        BeatType::StyleReset => &["laughs", "side-eye"],
        BeatType::BanterLoop | BeatType::HotTakeRound => &["laughs", "side-eye", "nods"],
        BeatType::Deescalate => &["calms", "deep breath"],
        BeatType::ArgumentSpike => &["gasps", "mock outrage"],
        BeatType::RoastUserLight
        | BeatType::CallbackBit
        | BeatType::IntroduceNewBit
        | BeatType::TopicPivot => &[],
    }
}

/// Cut-in cue of a beat that allows interruptions.
pub const fn interruption_cue(beat: BeatType) -> Option<&'static str> {
    match beat {
        BeatType::ArgumentSpike => Some("wait, hold up"),
        BeatType::BanterLoop => Some("yo quick add"),
        _ => None,
    }
}

/// Build the narrated reactions for a turn.
///
/// Reactors are the secondaries followed by the primary, without repeats;
/// cues are handed out positionally until either list runs out.
pub fn build_reactions(beat: BeatType, allocation: &SpeakerAllocation) -> Vec<Reaction> {
    let mut reactors: Vec<ParticipantId> = Vec::with_capacity(allocation.secondaries.len().saturating_add(1));
    for id in allocation
        .secondaries
        .iter()
        .copied()
        .chain(std::iter::once(allocation.primary))
    {
        if !reactors.contains(&id) {
            reactors.push(id);
        }
    }

    let mut at_ms = REACTION_BASE_MS;
    let mut reactions = Vec::new();
    for (agent, cue) in reactors.into_iter().zip(reaction_cues(beat)) {
        reactions.push(Reaction {
            agent,
            cue: (*cue).to_owned(),
            at_ms,
        });
        at_ms = at_ms.saturating_add(REACTION_STEP_MS);
    }
    reactions
}

/// Build the interruption for a turn, if any.
///
/// Only `argument_spike` and `banter_loop` interrupt. The candidate pool is
/// every roster participant that is not the primary, not the target and
/// not already delivering a quip. Each candidate scores the larger of its
/// conflict with the primary and with the target; the highest score wins,
/// ties in registry order.
pub fn build_interruptions(
    beat: BeatType,
    allocation: &SpeakerAllocation,
    quip_agents: &[ParticipantId],
    roster: &Roster,
    graph: &ConflictGraph,
) -> Vec<Interruption> {
    let Some(cue) = interruption_cue(beat) else {
        return Vec::new();
    };

    let mut best: Option<(ParticipantId, f64)> = None;
    let pool = roster.ids().filter(|id| {
        *id != allocation.primary && Some(*id) != allocation.target && !quip_agents.contains(id)
    });
    for candidate in pool {
        let against_primary = graph.weight(candidate, allocation.primary);
        let against_target = allocation
            .target
            .map_or(0.0, |target| graph.weight(candidate, target));
        let score = against_primary.max(against_target);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(agent, _)| Interruption {
        agent,
        cue: cue.to_owned(),
        at_ms: INTERRUPTION_BASE_MS,
    })
    .into_iter()
    .collect()
}
