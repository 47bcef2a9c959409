//! Server-level errors: the thin layer above `whiteboard_core::CoreError`
//! that also accounts for protocol decoding and session bookkeeping
//! failures, and knows how to become an HTTP response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use whiteboard_core::CoreError;
use whiteboard_proto::ProtocolError;

/// Errors surfaced by the websocket driver and admin HTTP surface.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The room pipeline (Validator, Resolver, Event Log) rejected the
    /// request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The inbound frame was not valid JSON or did not match a known shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An admin HTTP request named a room that does not exist.
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

impl ServerError {
    /// The exact client-facing message for this failure (§7). `Protocol`
    /// never surfaces the underlying parser diagnostics carried by
    /// `ProtocolError::Malformed`'s `Display` — those are for logs only.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Core(err) => err.client_message(),
            Self::Protocol(_) => "Invalid message format".to_owned(),
            Self::RoomNotFound(room_id) => format!("Room not found: {room_id}"),
        }
    }

    /// The HTTP status this error maps to on the admin surface (§6.2/§7).
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::InvalidEvent { .. } | CoreError::Conflict | CoreError::NotInRoom)
            | Self::Protocol(_) => StatusCode::BAD_REQUEST,
            Self::RoomNotFound(_) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::Saturated { .. }) => StatusCode::CONFLICT,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody { error: self.client_message() });
        (status, body).into_response()
    }
}
