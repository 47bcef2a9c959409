//! Domain errors for the room state machine.
//!
//! Every variant here is one of the taxonomy entries from the error handling
//! design: each maps to exactly one client-facing `ERROR` message and,
//! separately, to an HTTP status on the admin surface.

use thiserror::Error;

/// Errors raised by the room pipeline (Validator, Resolver, Event Log).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The Event Validator rejected the payload.
    #[error("invalid event: {reason}")]
    InvalidEvent {
        /// Human-readable reason, safe to send to the client.
        reason: String,
    },

    /// The session submitting a whiteboard event has no current room.
    #[error("not in a room")]
    NotInRoom,

    /// The Conflict Resolver dropped the event.
    #[error("event rejected due to conflict resolution")]
    Conflict,

    /// The room's event log is at its soft cap.
    #[error("room log saturated at {capacity} events")]
    Saturated {
        /// The cap that was hit.
        capacity: usize,
    },
}

impl CoreError {
    /// The exact client-facing `ERROR` message for this failure (§7).
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidEvent { .. } => "Invalid event".to_owned(),
            Self::NotInRoom => "Not in a room".to_owned(),
            Self::Conflict => "Event rejected due to conflict resolution".to_owned(),
            Self::Saturated { .. } => "Event rejected: room log saturated".to_owned(),
        }
    }

    /// Returns true if this error is safe to retry as-is (same event,
    /// unmodified) with some chance of success later.
    ///
    /// `Saturated` is the only retryable case in principle (the log could
    /// drain via an administrative reset); the rest are permanent rejections
    /// of this exact event.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Saturated { .. })
    }
}
