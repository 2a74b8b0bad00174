//! Content request budgeting.
//!
//! Every turn asks the generator for one full reply from the primary, a
//! handful of quips from the secondaries, and one cut-in line per
//! interrupter, never more than [`MAX_CONTENT_REQUESTS`] in total.

use partyline_types::{
    BeatType, BudgetMode, ContentKind, ContentRequest, Interruption, MAX_CONTENT_REQUESTS,
    ParticipantId,
};

use crate::allocation::SpeakerAllocation;

/// Quips requested at most per turn.
const MAX_QUIPS: usize = 2;

/// Character budget of an interruption line.
pub const INTERRUPTION_CHARS: u32 = 90;

const INTERRUPTION_HINT: &str = "1 short cut-in interruption line in character, directly reacting to the user text and/or primary speaker. No slurs.";

/// Character budget of the primary's full reply.
pub const fn full_reply_chars(budget: BudgetMode) -> u32 {
    match budget {
        BudgetMode::Normal => 420,
        BudgetMode::Frugal => 220,
    }
}

/// Character budget of a generic quip.
pub const fn quip_chars(budget: BudgetMode) -> u32 {
    match budget {
        BudgetMode::Normal => 120,
        BudgetMode::Frugal => 80,
    }
}

fn quip(agent: ParticipantId, max_chars: u32, style_hint: String) -> ContentRequest {
    ContentRequest {
        id: format!("quip_{agent}"),
        agent,
        kind: ContentKind::Quip,
        max_chars,
        style_hint,
    }
}

/// Build the full reply and quip requests for a turn.
pub fn build_content_requests(
    beat: BeatType,
    allocation: &SpeakerAllocation,
    budget: BudgetMode,
) -> Vec<ContentRequest> {
    let primary = allocation.primary;
    let primary_hint = match (beat, allocation.target) {
        (BeatType::ArgumentSpike, Some(target)) => {
            format!("{beat} response in character, pick a side and provoke {target}. Avoid slurs.")
        }
        _ => format!("{beat} response in character, avoid slurs."),
    };

    let mut requests = vec![ContentRequest {
        id: format!("full_{primary}"),
        agent: primary,
        kind: ContentKind::FullReply,
        max_chars: full_reply_chars(budget),
        style_hint: primary_hint,
    }];

    let generic_hint = || format!("{beat} quick quip in character.");
    let quippers = allocation.secondaries.iter().copied().take(MAX_QUIPS);
    match beat {
        BeatType::AnswerUser => {
            if let Some(first) = allocation.secondaries.first() {
                requests.push(quip(*first, 100, generic_hint()));
            }
        }
        BeatType::StyleReset => {
            requests.extend(quippers.map(|agent| quip(agent, 90, generic_hint())));
        }
        BeatType::ArgumentSpike => {
            requests.extend(quippers.map(|agent| {
                let hint = if allocation.target == Some(agent) {
                    format!("argument_spike directly rebut {primary}.")
                } else {
                    String::from("argument_spike egg it on.")
                };
                quip(agent, quip_chars(budget), hint)
            }));
        }
        _ => {
            requests.extend(quippers.map(|agent| quip(agent, quip_chars(budget), generic_hint())));
        }
    }
    requests
}

/// One interruption request per interrupter, tagged with the turn index.
pub fn interruption_requests(interruptions: &[Interruption], turn_index: u64) -> Vec<ContentRequest> {
    interruptions
        .iter()
        .map(|interruption| ContentRequest {
            id: format!("int_{}_{turn_index}", interruption.agent),
            agent: interruption.agent,
            kind: ContentKind::Interruption,
            max_chars: INTERRUPTION_CHARS,
            style_hint: INTERRUPTION_HINT.to_owned(),
        })
        .collect()
}

/// Append interruption requests without exceeding the request cap.
///
/// When the interruptions do not fit, quips are dropped from the end of the
/// list until they do (the full reply and existing interruptions are never
/// dropped). Whatever still does not fit is left out.
pub fn append_interruption_requests(requests: &mut Vec<ContentRequest>, extra: Vec<ContentRequest>) {
    let available = MAX_CONTENT_REQUESTS.saturating_sub(requests.len());
    let mut to_drop = extra.len().saturating_sub(available);
    while to_drop > 0 {
        let Some(last_quip) = requests.iter().rposition(|req| req.kind == ContentKind::Quip) else {
            break;
        };
        requests.remove(last_quip);
        to_drop = to_drop.saturating_sub(1);
    }

    let remaining = MAX_CONTENT_REQUESTS.saturating_sub(requests.len());
    requests.extend(extra.into_iter().take(remaining));
}

/// Agents holding a quip request, in request order.
pub fn quip_agents(requests: &[ContentRequest]) -> Vec<ParticipantId> {
    requests
        .iter()
        .filter(|req| req.kind == ContentKind::Quip)
        .map(|req| req.agent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ParticipantId::{Logician, MemeGoblin, MidwestDad, Therapist};

    fn allocation(
        primary: ParticipantId,
        secondaries: &[ParticipantId],
        target: Option<ParticipantId>,
    ) -> SpeakerAllocation {
        SpeakerAllocation {
            primary,
            secondaries: secondaries.to_vec(),
            target,
        }
    }

    fn ids(requests: &[ContentRequest]) -> Vec<&str> {
        requests.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn answer_user_gets_one_quip() {
        let requests = build_content_requests(
            BeatType::AnswerUser,
            &allocation(Logician, &[Therapist], None),
            BudgetMode::Normal,
        );
        assert_eq!(ids(&requests), vec!["full_logician", "quip_therapist"]);
        assert_eq!(requests.get(1).map(|r| r.max_chars), Some(100));
        assert_eq!(
            requests.first().map(|r| r.style_hint.as_str()),
            Some("answer_user response in character, avoid slurs.")
        );
    }

    #[test]
    fn style_reset_quips_are_short() {
        let requests = build_content_requests(
            BeatType::StyleReset,
            &allocation(Therapist, &[Logician, MidwestDad], None),
            BudgetMode::Normal,
        );
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().skip(1).all(|r| r.max_chars == 90));
    }

    #[test]
    fn argument_spike_hints_name_the_target() {
        let requests = build_content_requests(
            BeatType::ArgumentSpike,
            &allocation(MemeGoblin, &[Logician, Therapist], Some(Logician)),
            BudgetMode::Normal,
        );
        let hints: Vec<&str> = requests.iter().map(|r| r.style_hint.as_str()).collect();
        assert_eq!(
            hints,
            vec![
                "argument_spike response in character, pick a side and provoke logician. Avoid slurs.",
                "argument_spike directly rebut meme_goblin.",
                "argument_spike egg it on.",
            ]
        );
    }

    #[test]
    fn frugal_budget_shrinks_requests() {
        let requests = build_content_requests(
            BeatType::HotTakeRound,
            &allocation(MemeGoblin, &[Logician, Therapist], None),
            BudgetMode::Frugal,
        );
        let chars: Vec<u32> = requests.iter().map(|r| r.max_chars).collect();
        assert_eq!(chars, vec![220, 80, 80]);
    }

    #[test]
    fn interruption_request_ids_carry_turn_index() {
        let interruptions = [Interruption {
            agent: MidwestDad,
            cue: "wait, hold up".to_owned(),
            at_ms: 280,
        }];
        let requests = interruption_requests(&interruptions, 7);
        assert_eq!(ids(&requests), vec!["int_midwest_dad_7"]);
        assert_eq!(requests.first().map(|r| r.kind), Some(ContentKind::Interruption));
    }

    #[test]
    fn append_within_cap_keeps_everything() {
        let mut requests = build_content_requests(
            BeatType::ArgumentSpike,
            &allocation(MemeGoblin, &[Logician, Therapist], Some(Logician)),
            BudgetMode::Normal,
        );
        let extra = interruption_requests(
            &[Interruption {
                agent: MidwestDad,
                cue: "wait, hold up".to_owned(),
                at_ms: 280,
            }],
            1,
        );
        append_interruption_requests(&mut requests, extra);
        assert_eq!(
            ids(&requests),
            vec!["full_meme_goblin", "quip_logician", "quip_therapist", "int_midwest_dad_1"]
        );
    }

    #[test]
    fn overflow_drops_quips_from_the_end() {
        let mut requests = build_content_requests(
            BeatType::BanterLoop,
            &allocation(MemeGoblin, &[Logician, Therapist], None),
            BudgetMode::Normal,
        );
        let extra = interruption_requests(
            &[
                Interruption {
                    agent: MidwestDad,
                    cue: "yo quick add".to_owned(),
                    at_ms: 280,
                },
                Interruption {
                    agent: Therapist,
                    cue: "yo quick add".to_owned(),
                    at_ms: 280,
                },
            ],
            3,
        );
        append_interruption_requests(&mut requests, extra);
        assert_eq!(
            ids(&requests),
            vec!["full_meme_goblin", "quip_logician", "int_midwest_dad_3", "int_therapist_3"]
        );
        assert!(requests.len() <= MAX_CONTENT_REQUESTS);
    }

    #[test]
    fn never_exceeds_cap_even_without_quips() {
        let mut requests = build_content_requests(
            BeatType::TopicPivot,
            &allocation(MidwestDad, &[], None),
            BudgetMode::Normal,
        );
        let extra: Vec<ContentRequest> = (0..6)
            .map(|n| ContentRequest {
                id: format!("int_extra_{n}"),
                agent: Logician,
                kind: ContentKind::Interruption,
                max_chars: INTERRUPTION_CHARS,
                style_hint: INTERRUPTION_HINT.to_owned(),
            })
            .collect();
        append_interruption_requests(&mut requests, extra);
        assert_eq!(requests.len(), MAX_CONTENT_REQUESTS);
        assert_eq!(requests.first().map(|r| r.kind), Some(ContentKind::FullReply));
    }

    #[test]
    fn quip_agents_in_request_order() {
        let requests = build_content_requests(
            BeatType::ArgumentSpike,
            &allocation(MemeGoblin, &[Logician, Therapist], Some(Logician)),
            BudgetMode::Normal,
        );
        assert_eq!(quip_agents(&requests), vec![Logician, Therapist]);
    }
}
