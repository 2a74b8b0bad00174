//! Shared application state for the turn API.
//!
//! The room lives in a [`RoomSession`] behind a `tokio` mutex that is held
//! for the whole of a turn, so turns against the room are strictly
//! serialized and `/state` never observes a half-applied turn.

use rand::rngs::StdRng;
use tokio::sync::Mutex;

use partyline_core::{PartylineConfig, TurnEngine, TurnError};
use partyline_runtime::TemplateGenerator;
use partyline_store::{RoomStore, TurnLog};

/// The mutable half of the app: the room and its delivery RNG.
#[derive(Debug)]
pub struct RoomSession {
    /// Room state and turn log.
    pub store: RoomStore,
    /// Jitter source for transcript timing.
    pub rng: StdRng,
}

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    /// The turn pipeline.
    pub engine: TurnEngine<TemplateGenerator>,
    /// The single room.
    pub session: Mutex<RoomSession>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(engine: TurnEngine<TemplateGenerator>, store: RoomStore, rng: StdRng) -> Self {
        Self {
            engine,
            session: Mutex::new(RoomSession { store, rng }),
        }
    }

    /// Build the engine, room store, and RNG described by `config`.
    pub fn from_config(config: &PartylineConfig) -> Result<Self, TurnError> {
        let engine = TurnEngine::from_config(config)?;
        let store = RoomStore::new().with_log(TurnLog::new(config.logging.turn_log_path.clone()));
        Ok(Self::new(engine, store, config.randomness.rng()))
    }
}
