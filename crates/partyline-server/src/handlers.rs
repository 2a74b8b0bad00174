//! REST endpoint handlers for the turn API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/turn` | Run one turn for `{user_id?, text}` |
//! | `GET` | `/state` | Current room state |
//! | `POST` | `/reset` | Restore the default room |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;

use partyline_core::TurnOutcome;
use partyline_types::RoomState;

use crate::error::ApiError;
use crate::state::{AppState, RoomSession};

/// Body of `POST /turn`.
///
/// Fields are loosely typed: a non-string `user_id` falls back to the
/// default user and a non-string `text` counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct TurnRequest {
    /// Caller identity.
    #[serde(default)]
    pub user_id: Option<Value>,
    /// What the user said.
    #[serde(default)]
    pub text: Option<Value>,
}

// ---------------------------------------------------------------------------
// POST /turn
// ---------------------------------------------------------------------------

/// Run one turn and return the plan, transcript, and new room state.
pub async fn run_turn(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TurnRequest>, JsonRejection>,
) -> Result<Json<TurnOutcome>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let text = request
        .text
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();
    let user_id = request.user_id.as_ref().and_then(Value::as_str);

    let mut session = state.session.lock().await;
    let RoomSession { store, rng } = &mut *session;
    let outcome = state.engine.run_turn(store, user_id, text, rng).await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// GET /state, POST /reset
// ---------------------------------------------------------------------------

/// Return the current room state.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<RoomState> {
    let session = state.session.lock().await;
    Json(session.store.state().clone())
}

/// Restore the default room and return it.
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<RoomState> {
    let mut session = state.session.lock().await;
    Json(session.store.reset())
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
