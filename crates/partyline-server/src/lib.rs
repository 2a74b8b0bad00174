//! HTTP turn API for Partyline.
//!
//! An Axum server exposing the single room: run a turn, read the state,
//! reset it. Turns are serialized through the room session mutex in
//! [`AppState`].
//!
//! # Modules
//!
//! - [`handlers`] -- Endpoint handlers
//! - [`router`] -- Route table and middleware
//! - [`server`] -- Listener lifecycle
//! - [`state`] -- Shared application state
//! - [`error`] -- API error responses
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, RoomSession};
