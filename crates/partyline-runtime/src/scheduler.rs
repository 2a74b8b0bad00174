//! Transcript timing.
//!
//! The [`TimingScheduler`] turns a plan plus the generated line for each
//! content request into a time-ordered transcript. Lines follow each other
//! with a jittered micro-delay. On an `argument_spike` with an interruption,
//! the primary's reply is cut in two around the interruption, and every
//! other line waits until the primary has finished.

use rand::Rng;
use tracing::debug;

use partyline_director::Roster;
use partyline_types::{
    BeatType, ContentKind, ContentRequest, PlayPlan, Speaker, TranscriptEvent, sort_by_time,
};

use crate::generator::GeneratedTexts;
use crate::timing::{estimate_speak_ms, interruption_time, split_line};

/// Smallest gap between consecutive lines, whatever the plan asks for.
pub const MIN_MICRO_DELAY_MS: u64 = 80;

/// Delay between the interruption and the rest of the primary's line.
pub const SUFFIX_DELAY_MS: u64 = 120;

/// Earliest the deferred lines may resume after the interruption.
pub const RESUME_AFTER_INTERRUPTION_MS: u64 = 200;

/// Jittered cadence between consecutive lines.
#[derive(Debug, Clone, Copy)]
struct Cadence {
    min_ms: u64,
    span_ms: u64,
}

impl Cadence {
    fn for_plan(plan: &PlayPlan) -> Self {
        let min_ms = plan.pacing.micro_delay_ms_min.max(MIN_MICRO_DELAY_MS);
        Self {
            min_ms,
            span_ms: plan.pacing.micro_delay_ms_max.saturating_sub(min_ms),
        }
    }

    fn next_gap(self, rng: &mut impl Rng) -> u64 {
        self.min_ms.saturating_add(rng.random_range(0..=self.span_ms))
    }
}

/// Places generated lines on a timeline.
#[derive(Debug, Clone)]
pub struct TimingScheduler {
    roster: Roster,
}

impl TimingScheduler {
    /// Create a scheduler for the given roster.
    pub const fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Build the transcript for `plan` from the generated `texts`.
    ///
    /// Requests whose agent is not in the roster, or with no generated text,
    /// are skipped.
    pub fn schedule(
        &self,
        plan: &PlayPlan,
        texts: &GeneratedTexts,
        rng: &mut impl Rng,
    ) -> Vec<TranscriptEvent> {
        let cadence = Cadence::for_plan(plan);
        let primary_request = plan
            .content_requests
            .iter()
            .find(|r| r.kind == ContentKind::FullReply && r.agent == plan.primary_speaker);
        let split = if plan.beat_type == BeatType::ArgumentSpike && !plan.interruptions.is_empty() {
            primary_request.and_then(|req| self.line_for(req, texts).map(|text| (req, text)))
        } else {
            None
        };

        let mut events = Vec::new();
        let mut deferred: Vec<&ContentRequest> = Vec::new();
        let mut cut_at = None;
        let mut cursor = 0_u64;

        for request in &plan.content_requests {
            if request.kind == ContentKind::Interruption {
                continue;
            }
            if let Some((primary, text)) = split {
                if std::ptr::eq(request, primary) {
                    let duration = estimate_speak_ms(text, plan.pacing.pace_wpm);
                    let at_ms = interruption_time(duration);
                    let halves = split_line(text, at_ms, duration);
                    debug!(
                        request = %request.id,
                        duration_ms = duration,
                        interruption_ms = at_ms,
                        "splitting primary line around interruption"
                    );
                    events.push(TranscriptEvent::new(0, request.agent, halves.prefix));
                    if !halves.suffix.is_empty() {
                        events.push(TranscriptEvent::new(
                            at_ms.saturating_add(SUFFIX_DELAY_MS),
                            request.agent,
                            halves.suffix,
                        ));
                    }
                    cut_at = Some(at_ms);
                    cursor = cursor.saturating_add(cadence.next_gap(rng));
                } else {
                    deferred.push(request);
                }
                continue;
            }
            if let Some(text) = self.line_for(request, texts) {
                events.push(TranscriptEvent::new(cursor, request.agent, text));
                cursor = cursor.saturating_add(cadence.next_gap(rng));
            }
        }

        for reaction in &plan.reactions {
            events.push(TranscriptEvent::new(
                reaction.at_ms,
                Speaker::Narrator,
                format!("({} {})", reaction.agent, reaction.cue),
            ));
        }

        for (position, interruption) in plan.interruptions.iter().enumerate() {
            let text = plan
                .content_requests
                .iter()
                .find(|r| r.kind == ContentKind::Interruption && r.agent == interruption.agent)
                .and_then(|req| self.line_for(req, texts))
                .unwrap_or(interruption.cue.as_str());
            let at_ms = match cut_at {
                Some(at_ms) if position == 0 => at_ms,
                _ => interruption.at_ms,
            };
            events.push(TranscriptEvent::new(at_ms, interruption.agent, text));
        }

        if let Some(at_ms) = cut_at {
            let suffix_time = at_ms.saturating_add(SUFFIX_DELAY_MS);
            let resume = suffix_time.max(at_ms.saturating_add(RESUME_AFTER_INTERRUPTION_MS));
            let mut cursor = resume.saturating_add(cadence.min_ms);
            for request in deferred {
                if let Some(text) = self.line_for(request, texts) {
                    events.push(TranscriptEvent::new(cursor, request.agent, text));
                    cursor = cursor.saturating_add(cadence.next_gap(rng));
                }
            }
        }

        sort_by_time(&mut events);
        events
    }

    fn line_for<'t>(&self, request: &ContentRequest, texts: &'t GeneratedTexts) -> Option<&'t str> {
        if !self.roster.contains(request.agent) {
            debug!(request = %request.id, agent = %request.agent, "skipping line for unknown participant");
            return None;
        }
        let text = texts.get(&request.id).map(String::as_str);
        if text.is_none() {
            debug!(request = %request.id, "no generated text for request");
        }
        text
    }
}
