//! Transcript events: the final, time-ordered output of a turn.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::Speaker;

/// One line (or stage direction) in the turn transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TranscriptEvent {
    /// Offset from turn start, in milliseconds.
    pub at_ms: u64,
    /// A participant id, or `"narrator"`.
    #[ts(as = "String")]
    pub speaker: Speaker,
    /// What is said or narrated.
    pub text: String,
}

impl TranscriptEvent {
    /// Create an event.
    pub fn new(at_ms: u64, speaker: impl Into<Speaker>, text: impl Into<String>) -> Self {
        Self {
            at_ms,
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Sort events by `at_ms`, keeping insertion order for equal timestamps.
pub fn sort_by_time(events: &mut [TranscriptEvent]) {
    // `sort_by_key` is a stable sort.
    events.sort_by_key(|event| event.at_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ParticipantId;

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let mut events = vec![
            TranscriptEvent::new(300, ParticipantId::Logician, "late"),
            TranscriptEvent::new(140, Speaker::Narrator, "first tie"),
            TranscriptEvent::new(140, ParticipantId::Therapist, "second tie"),
            TranscriptEvent::new(0, ParticipantId::MemeGoblin, "opener"),
        ];
        sort_by_time(&mut events);
        let texts: Vec<&str> = events.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["opener", "first tie", "second tie", "late"]);
    }

    #[test]
    fn narrator_event_json_shape() {
        let event = TranscriptEvent::new(140, Speaker::Narrator, "(therapist nods)");
        let json = serde_json::to_value(&event).ok().unwrap_or_default();
        assert_eq!(json["speaker"], "narrator");
        assert_eq!(json["at_ms"], 140);
    }
}
