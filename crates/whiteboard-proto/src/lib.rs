//! Wire types for the whiteboard room protocol.
//!
//! Frames are JSON objects discriminated by a `type` tag, sent as UTF-8 text
//! over a persistent bidirectional connection (a websocket, in this
//! implementation). This crate only knows about encoding and decoding;
//! ordering, validation and conflict resolution live in `whiteboard-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client_message;
mod error;
mod event;
mod server_message;

pub use client_message::{ClearCanvasBody, ClientFrame, DrawLineBody, DrawPathBody, EraseBody, JoinLeaveBody};
pub use error::ProtocolError;
pub use event::{Candidate, Event, EventKind, Point, Rect};
pub use server_message::ServerMessage;

/// Decode a single inbound text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if the text is not valid JSON or does
/// not match any known frame shape (including an unrecognized `type`).
pub fn decode_client_frame(text: &str) -> Result<ClientFrame, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::from)
}
