//! Outbound frames: everything the server may send over the socket.

use serde::Serialize;

use crate::event::Event;

/// Every frame the server may send, discriminated by its `type` tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Sent once, right after the socket is accepted, carrying the
    /// session's assigned id.
    #[serde(rename_all = "camelCase")]
    Connected {
        /// Hex-encoded id assigned to this session.
        session_id: String,
        /// Fixed greeting text.
        message: String,
    },
    /// Sent to a session in reply to `JOIN_ROOM`, carrying a full state
    /// snapshot of the room it just joined.
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        /// Room the session just joined.
        room_id: String,
        /// Number of sessions currently in the room, joiner included.
        user_count: usize,
        /// The room's event log, in sequence order.
        state: Vec<Event>,
        /// `state.len()`, included for clients that want the count without
        /// walking the array.
        state_event_count: usize,
    },
    /// An accepted, sequenced event, broadcast to every member of its room.
    Event(Event),
    /// A rejection addressed to the originating session only; never
    /// broadcast.
    Error {
        /// Client-facing rejection reason.
        error: String,
    },
}

impl ServerMessage {
    /// Build the greeting sent once, right after a socket is accepted.
    #[must_use]
    pub fn connected(session_id: impl Into<String>) -> Self {
        Self::Connected { session_id: session_id.into(), message: "connected".to_owned() }
    }

    /// Build an `ERROR` frame with a fixed, client-facing message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error: message.into() }
    }

    /// Serialize to the JSON text this frame is sent as.
    ///
    /// # Errors
    ///
    /// Only fails if a future variant carries non-serializable data; every
    /// current variant always succeeds.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
