//! The participant registry.
//!
//! A [`Roster`] is built once at start-up and never mutated. Its order is
//! the registry order used for every stable tie-break in the director.

use partyline_types::{Participant, ParticipantId};

use crate::error::DirectorError;

/// The participant the director falls back to when a turn must be calmed.
pub const CALM_PARTICIPANT: ParticipantId = ParticipantId::Therapist;

/// Taboos shared by every default persona.
const SHARED_TABOOS: [&str; 4] = [
    "slurs",
    "hate speech",
    "graphic violence",
    "explicit sexual content",
];

/// Immutable, ordered set of participants.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster from participants in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectorError::EmptyRoster`] for an empty list and
    /// [`DirectorError::DuplicateParticipant`] when an id appears twice.
    pub fn new(participants: Vec<Participant>) -> Result<Self, DirectorError> {
        if participants.is_empty() {
            return Err(DirectorError::EmptyRoster);
        }
        let mut seen: Vec<ParticipantId> = Vec::with_capacity(participants.len());
        for participant in &participants {
            if seen.contains(&participant.id) {
                return Err(DirectorError::DuplicateParticipant(participant.id));
            }
            seen.push(participant.id);
        }
        Ok(Self { participants })
    }

    /// Look up a participant by id.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Whether the roster contains `id`.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// Participant ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|p| p.id)
    }

    /// Participants in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always `false`; rosters are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            participants: vec![
                persona(
                    ParticipantId::Logician,
                    "Logician",
                    0.2,
                    &[
                        "Use structured reasoning and short lists.",
                        "Clarify assumptions and reduce ambiguity.",
                        "Avoid meandering; be crisp.",
                    ],
                ),
                persona(
                    ParticipantId::Therapist,
                    "Therapist",
                    0.1,
                    &[
                        "Warm moderator tone.",
                        "Reflect emotions and deescalate.",
                        "Invite others to play nice.",
                    ],
                ),
                persona(
                    ParticipantId::MemeGoblin,
                    "Meme Goblin",
                    0.85,
                    &[
                        "Fast chaotic energy.",
                        "Callbacks and playful banter.",
                        "Short punchy lines.",
                    ],
                ),
                persona(
                    ParticipantId::MidwestDad,
                    "Midwest Dad",
                    0.55,
                    &[
                        "Confident dad wisdom.",
                        "One-liners and gentle teasing.",
                        "Keep it folksy.",
                    ],
                ),
            ],
        }
    }
}

fn persona(id: ParticipantId, name: &str, profanity_level: f64, rules: &[&str]) -> Participant {
    Participant {
        id,
        display_name: name.to_owned(),
        profanity_level,
        style_rules: rules.iter().map(|r| (*r).to_owned()).collect(),
        taboos: SHARED_TABOOS.iter().map(|t| (*t).to_owned()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_is_in_registry_order() {
        let roster = Roster::default();
        let ids: Vec<ParticipantId> = roster.ids().collect();
        assert_eq!(ids, ParticipantId::ALL.to_vec());
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn default_personas_share_taboos() {
        let roster = Roster::default();
        for participant in roster.iter() {
            assert_eq!(participant.taboos.len(), 4);
            assert_eq!(participant.style_rules.len(), 3);
        }
        let goblin = roster.get(ParticipantId::MemeGoblin);
        assert_eq!(goblin.map(|p| p.display_name.as_str()), Some("Meme Goblin"));
    }

    #[test]
    fn empty_roster_rejected() {
        assert!(matches!(Roster::new(Vec::new()), Err(DirectorError::EmptyRoster)));
    }

    #[test]
    fn duplicate_participant_rejected() {
        let one = persona(ParticipantId::Logician, "A", 0.1, &[]);
        let two = persona(ParticipantId::Logician, "B", 0.1, &[]);
        let result = Roster::new(vec![one, two]);
        assert!(matches!(
            result,
            Err(DirectorError::DuplicateParticipant(ParticipantId::Logician))
        ));
    }
}
