//! Identifiers for participants, transcript speakers, and logged turns.
//!
//! Participants come from a closed set of four personas, so their identity
//! is an enum rather than a UUID. The declaration order of
//! [`ParticipantId`] is the registry order used for every stable tie-break
//! in the director. Logged turns get a UUID v7 [`TurnId`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identity of one synthetic participant in the room.
///
/// The derived [`Ord`] follows declaration order, which is the registry
/// order: logician, therapist, meme goblin, midwest dad.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ParticipantId {
    /// Structured, crisp reasoner.
    Logician,
    /// Warm moderator; the designated calming participant.
    Therapist,
    /// Chaotic callback machine.
    MemeGoblin,
    /// Folksy one-liners.
    MidwestDad,
}

impl ParticipantId {
    /// All participants in registry order.
    pub const ALL: [Self; 4] = [
        Self::Logician,
        Self::Therapist,
        Self::MemeGoblin,
        Self::MidwestDad,
    ];

    /// Wire name of the participant (`snake_case`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logician => "logician",
            Self::Therapist => "therapist",
            Self::MemeGoblin => "meme_goblin",
            Self::MidwestDad => "midwest_dad",
        }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known participant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown participant: {0}")]
pub struct UnknownParticipant(pub String);

impl FromStr for ParticipantId {
    type Err = UnknownParticipant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownParticipant(s.to_owned()))
    }
}

/// Who an entry in the transcript belongs to.
///
/// Serialized as a plain string: a participant id, or `"narrator"` for
/// stage directions such as reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Speaker {
    /// A line spoken by a participant.
    Participant(ParticipantId),
    /// A stage direction.
    Narrator,
}

impl Speaker {
    /// Wire name of the narrator speaker.
    pub const NARRATOR: &'static str = "narrator";

    /// The participant behind this speaker, if any.
    pub const fn participant(self) -> Option<ParticipantId> {
        match self {
            Self::Participant(id) => Some(id),
            Self::Narrator => None,
        }
    }
}

impl From<ParticipantId> for Speaker {
    fn from(id: ParticipantId) -> Self {
        Self::Participant(id)
    }
}

impl From<Speaker> for String {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::Participant(id) => id.as_str().to_owned(),
            Speaker::Narrator => Speaker::NARRATOR.to_owned(),
        }
    }
}

impl TryFrom<String> for Speaker {
    type Error = UnknownParticipant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::NARRATOR {
            return Ok(Self::Narrator);
        }
        value.parse().map(Self::Participant)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participant(id) => f.write_str(id.as_str()),
            Self::Narrator => f.write_str(Self::NARRATOR),
        }
    }
}

/// Unique identifier for one logged turn.
///
/// Uses UUID v7 so log lines sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TurnId(pub Uuid);

impl TurnId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_ord() {
        let mut shuffled = [
            ParticipantId::MidwestDad,
            ParticipantId::Logician,
            ParticipantId::MemeGoblin,
            ParticipantId::Therapist,
        ];
        shuffled.sort();
        assert_eq!(shuffled, ParticipantId::ALL);
    }

    #[test]
    fn participant_wire_names() {
        let json = serde_json::to_string(&ParticipantId::MemeGoblin).ok();
        assert_eq!(json.as_deref(), Some("\"meme_goblin\""));
        assert_eq!("midwest_dad".parse::<ParticipantId>().ok(), Some(ParticipantId::MidwestDad));
        assert!("bard".parse::<ParticipantId>().is_err());
    }

    #[test]
    fn speaker_serializes_as_plain_string() {
        let narrator = serde_json::to_string(&Speaker::Narrator).ok();
        assert_eq!(narrator.as_deref(), Some("\"narrator\""));

        let agent = serde_json::to_string(&Speaker::from(ParticipantId::Therapist)).ok();
        assert_eq!(agent.as_deref(), Some("\"therapist\""));

        let parsed: Result<Speaker, _> = serde_json::from_str("\"logician\"");
        assert_eq!(parsed.ok(), Some(Speaker::Participant(ParticipantId::Logician)));

        let unknown: Result<Speaker, _> = serde_json::from_str("\"audience\"");
        assert!(unknown.is_err());
    }

    #[test]
    fn turn_id_display_matches_uuid() {
        let id = TurnId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
        assert_ne!(id.into_inner(), Uuid::nil());
    }
}
