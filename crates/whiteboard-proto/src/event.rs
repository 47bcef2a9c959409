//! Stored event types: the payloads that make up a room's event log.
//!
//! `DRAW_LINE` and `DRAW_PATH` share the same shape but keep their own field
//! name (`points` vs `path`) on the wire — the distinction is advisory
//! client-rendering intent, not a server semantic, so we preserve it rather
//! than collapsing the two variants.

use serde::{Deserialize, Serialize};

/// A single (x, y) coordinate pair.
pub type Point = [f64; 2];

/// Axis-aligned rectangle used by `ERASE`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Must be > 0.
    pub width: f64,
    /// Must be > 0.
    pub height: f64,
}

/// The closed set of event payloads that may appear in a room's log.
///
/// Control events (`JOIN_ROOM`, `LEAVE_ROOM`) are not part of this set — they
/// never reach the Event Log (see [`crate::client_message::ClientFrame`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A freehand line segment given as raw points.
    DrawLine {
        /// The stroke's sampled coordinates, in order.
        points: Vec<Point>,
        /// CSS-style color string (e.g. `#FF0000`).
        color: String,
        /// Line width in canvas units.
        #[serde(rename = "strokeWidth")]
        stroke_width: f64,
    },
    /// A freehand line segment given as a path — same shape as `DrawLine`,
    /// kept as a distinct wire variant (see module docs).
    DrawPath {
        /// The stroke's sampled coordinates, in order.
        path: Vec<Point>,
        /// CSS-style color string (e.g. `#FF0000`).
        color: String,
        /// Line width in canvas units.
        #[serde(rename = "strokeWidth")]
        stroke_width: f64,
    },
    /// Clears a rectangular region of the canvas.
    Erase {
        /// The region to clear.
        region: Rect,
    },
    /// Clears the entire canvas, subject to the clear-cooldown debounce.
    ClearCanvas,
}

impl EventKind {
    /// The wire `type` tag, for logging and error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DrawLine { .. } => "DRAW_LINE",
            Self::DrawPath { .. } => "DRAW_PATH",
            Self::Erase { .. } => "ERASE",
            Self::ClearCanvas => "CLEAR_CANVAS",
        }
    }
}

/// A candidate event before acceptance: header fields plus payload, no
/// sequence number yet. This is what the Event Validator produces and what
/// the Conflict Resolver inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Room this candidate is destined for; server-rewritten on ingress
    /// from the session's current room for non-control frames.
    pub room_id: String,
    /// Milliseconds since epoch; server-authoritative on ingress.
    pub timestamp: i64,
    /// The event payload itself.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// An accepted, sequenced event as it lives in the Event Log and is
/// broadcast to room members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Room this event belongs to.
    pub room_id: String,
    /// Milliseconds since epoch, as recorded by the server at acceptance.
    pub timestamp: i64,
    /// Assigned by the server at acceptance; total order within a room.
    pub sequence: u64,
    /// The event payload itself.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Build a stored event from an accepted candidate and its assigned
    /// sequence number.
    #[must_use]
    pub fn from_candidate(candidate: Candidate, sequence: u64) -> Self {
        Self {
            user_id: candidate.user_id,
            room_id: candidate.room_id,
            timestamp: candidate.timestamp,
            sequence,
            kind: candidate.kind,
        }
    }
}
