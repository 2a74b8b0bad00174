//! Configuration and turn orchestration for Partyline.
//!
//! This crate ties the director, the content runtime, and the room store
//! together into a single turn entry point.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `partyline-config.yaml` into
//!   strongly-typed structs.
//! - [`turn`] -- The [`TurnEngine`] running one turn end to end.
//! - [`error`] -- Turn error types.
//!
//! [`TurnEngine`]: turn::TurnEngine

pub mod config;
pub mod error;
pub mod turn;

pub use config::{ConfigError, PartylineConfig};
pub use error::TurnError;
pub use turn::{DEFAULT_USER_ID, TurnEngine, TurnOutcome};
