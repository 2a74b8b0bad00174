//! Axum router construction for the turn API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router.
///
/// The router includes:
/// - `POST /turn` -- run one turn
/// - `GET /state` -- current room state
/// - `POST /reset` -- restore the default room
/// - `GET /health` -- liveness probe
///
/// CORS allows any origin so a browser client can drive the room.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/turn", post(handlers::run_turn))
        .route("/state", get(handlers::get_state))
        .route("/reset", post(handlers::reset))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
