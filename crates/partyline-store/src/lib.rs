//! Room state and turn persistence for Partyline.
//!
//! The store owns the single in-memory room, applies each delivered turn to
//! it, and appends a record of the turn to a JSONL log.
//!
//! # Modules
//!
//! - [`room`] -- State transitions and the room store
//! - [`log`] -- Append-only JSONL turn log
//! - [`error`] -- Error types

pub mod error;
pub mod log;
pub mod room;

pub use error::StoreError;
pub use log::{TurnLog, TurnLogEntry};
pub use room::{RoomStore, apply_plan};
