//! The content generator seam.
//!
//! The director decides *what kind* of line each participant says; a
//! [`ContentGenerator`] produces the words. Generation is the only suspension
//! point of a turn, so every request in a plan is generated up front, before
//! any timing is computed.

use std::collections::BTreeMap;
use std::future::Future;

use futures::future::try_join_all;
use tracing::{debug, warn};

use partyline_director::Roster;
use partyline_types::{BeatType, ContentRequest, Participant, PlayPlan, RoomState};

use crate::error::GenerateError;
use crate::timing::truncate_chars;

/// Generated text per content request id.
pub type GeneratedTexts = BTreeMap<String, String>;

/// Turns one content request into a line of at most `max_chars` characters.
///
/// Implementations must treat the room state as read-only.
pub trait ContentGenerator: Send + Sync {
    /// Generate the line for `request`, spoken by `agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the line cannot be produced; the turn
    /// is aborted.
    fn generate(
        &self,
        request: &ContentRequest,
        agent: &Participant,
        room: &RoomState,
        beat: BeatType,
        user_text: &str,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

/// Generate every content request of `plan` concurrently.
///
/// Requests for agents outside the roster are skipped. Lines longer than
/// their request allows are cut to `max_chars`.
pub async fn generate_all<G: ContentGenerator>(
    generator: &G,
    plan: &PlayPlan,
    roster: &Roster,
    room: &RoomState,
    user_text: &str,
) -> Result<GeneratedTexts, GenerateError> {
    let jobs = plan.content_requests.iter().filter_map(|request| {
        let Some(agent) = roster.get(request.agent) else {
            debug!(request = %request.id, agent = %request.agent, "skipping request for unknown participant");
            return None;
        };
        Some(async move {
            let text = generator
                .generate(request, agent, room, plan.beat_type, user_text)
                .await?;
            let limit = usize::try_from(request.max_chars).unwrap_or(usize::MAX);
            let text = if text.chars().count() > limit {
                warn!(request = %request.id, limit, "generated line over budget, truncating");
                truncate_chars(&text, limit)
            } else {
                text
            };
            Ok::<_, GenerateError>((request.id.clone(), text))
        })
    });

    let texts = try_join_all(jobs).await?;
    debug!(lines = texts.len(), beat = %plan.beat_type, "content generated");
    Ok(texts.into_iter().collect())
}
