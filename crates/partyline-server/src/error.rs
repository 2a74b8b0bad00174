//! Error types for the turn API.
//!
//! [`ApiError`] converts into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Input
//! problems map to `400`; everything else is a `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use partyline_core::TurnError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be used.
    #[error("{0}")]
    BadRequest(String),

    /// The turn failed.
    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) | Self::Turn(TurnError::Input(_)) => StatusCode::BAD_REQUEST,
            Self::Turn(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "turn failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
