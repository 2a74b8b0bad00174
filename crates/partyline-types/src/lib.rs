//! Shared type definitions for the Partyline dialogue director.
//!
//! This crate is the single source of truth for the data that flows between
//! the director, the runtime scheduler, the room store, and the HTTP layer.
//! Types flow downstream to `TypeScript` via `ts-rs` for client UIs.
//!
//! # Modules
//!
//! - [`ids`] -- Participant identities, transcript speakers, turn ids
//! - [`enums`] -- Beats, content kinds, room modes, safety categories
//! - [`room`] -- Participants, room state, user packet, safety flags
//! - [`plan`] -- The play plan and its parts, with schema validation rules
//! - [`transcript`] -- Time-ordered transcript events

pub mod enums;
pub mod ids;
pub mod plan;
pub mod room;
pub mod transcript;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BeatType, BudgetMode, ContentKind, FallbackMode, LanguageMode, PlanVersion, SafetyCategory,
};
pub use ids::{ParticipantId, Speaker, TurnId, UnknownParticipant};
pub use plan::{
    ContentRequest, Interruption, MAX_CONTENT_REQUESTS, MAX_REQUEST_CHARS, MAX_SECONDARY_SPEAKERS,
    Pacing, PlayPlan, Reaction, SafetyBlock, StateUpdates,
};
pub use room::{
    Cooldowns, DEFAULT_PACE_WPM, LastTurnsDigest, Participant, RECENT_SPEAKERS_CAPACITY,
    RoomState, RunningBit, SafetyFlags, Scene, UserPacket, clamp_unit,
};
pub use transcript::{TranscriptEvent, sort_by_time};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for client UIs.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ParticipantId::export_all();
        let _ = crate::ids::TurnId::export_all();

        // Enums
        let _ = crate::enums::BeatType::export_all();
        let _ = crate::enums::ContentKind::export_all();
        let _ = crate::enums::LanguageMode::export_all();
        let _ = crate::enums::BudgetMode::export_all();
        let _ = crate::enums::SafetyCategory::export_all();
        let _ = crate::enums::FallbackMode::export_all();
        let _ = crate::enums::PlanVersion::export_all();

        // Room
        let _ = crate::room::Participant::export_all();
        let _ = crate::room::RunningBit::export_all();
        let _ = crate::room::Scene::export_all();
        let _ = crate::room::Cooldowns::export_all();
        let _ = crate::room::LastTurnsDigest::export_all();
        let _ = crate::room::RoomState::export_all();
        let _ = crate::room::UserPacket::export_all();
        let _ = crate::room::SafetyFlags::export_all();

        // Plan
        let _ = crate::plan::Interruption::export_all();
        let _ = crate::plan::Reaction::export_all();
        let _ = crate::plan::Pacing::export_all();
        let _ = crate::plan::ContentRequest::export_all();
        let _ = crate::plan::StateUpdates::export_all();
        let _ = crate::plan::SafetyBlock::export_all();
        let _ = crate::plan::PlayPlan::export_all();

        // Transcript
        let _ = crate::transcript::TranscriptEvent::export_all();
    }
}
