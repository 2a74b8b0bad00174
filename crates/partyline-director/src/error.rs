//! Error types for the `partyline-director` crate.
//!
//! Planning itself is total; the failures here come from building a roster
//! or from a plan that does not satisfy the play plan schema.

use partyline_types::ParticipantId;

/// Errors that can occur while configuring the director or validating plans.
#[derive(Debug, thiserror::Error)]
pub enum DirectorError {
    /// The assembled (or received) plan violates the schema.
    ///
    /// Every violation is listed, one per entry.
    #[error("invalid play plan: {}", .violations.join("; "))]
    InvalidPlan {
        /// One human-readable line per schema violation.
        violations: Vec<String>,
    },

    /// A roster must contain at least one participant.
    #[error("roster is empty")]
    EmptyRoster,

    /// The same participant was registered twice.
    #[error("duplicate participant in roster: {0}")]
    DuplicateParticipant(ParticipantId),
}
