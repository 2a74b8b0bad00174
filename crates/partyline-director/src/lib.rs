//! Turn planning for the Partyline dialogue director.
//!
//! Given one user utterance and the current room snapshot, the director
//! decides the beat of the turn, who leads it, who chimes in, who cuts in,
//! what lines to ask the content generator for, and how the room should
//! change afterwards. Everything here is synchronous and deterministic.
//!
//! # Modules
//!
//! - [`roster`] -- The immutable participant registry
//! - [`conflict`] -- Weighted undirected conflict graph
//! - [`safety`] -- Keyword safety screen
//! - [`beat`] -- Beat selection
//! - [`allocation`] -- Primary, secondary, and target speakers
//! - [`cues`] -- Reactions and interruptions
//! - [`requests`] -- Content request budgeting
//! - [`state_updates`] -- Energy, tension, topic, and running-bit changes
//! - [`director`] -- The [`Director`] trait and the rule-based implementation
//! - [`validation`] -- Play plan schema validation
//! - [`error`] -- Error types

pub mod allocation;
pub mod beat;
pub mod conflict;
pub mod cues;
pub mod director;
pub mod error;
pub mod requests;
pub mod roster;
pub mod safety;
pub mod state_updates;
pub mod validation;

pub use allocation::SpeakerAllocation;
pub use conflict::{ConflictEdge, ConflictGraph, DEFAULT_CONFLICT_WEIGHT};
pub use director::{Director, RuleDirector};
pub use error::DirectorError;
pub use roster::{CALM_PARTICIPANT, Roster};
pub use safety::screen;
pub use validation::PlanValidator;
