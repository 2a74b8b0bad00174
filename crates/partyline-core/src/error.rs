//! Error types for a single turn.

use partyline_director::DirectorError;
use partyline_runtime::GenerateError;
use partyline_store::StoreError;

/// Reasons a turn can fail. None of them mutate the room.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The user packet was unusable.
    #[error("{0}")]
    Input(String),

    /// The plan failed schema validation.
    #[error(transparent)]
    Validation(#[from] DirectorError),

    /// A line could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerateError),

    /// The turn could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
