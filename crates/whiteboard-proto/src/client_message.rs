//! Inbound frames: everything a client may send over the socket.
//!
//! `roomId` is required for `JOIN_ROOM`/`LEAVE_ROOM` but, for the
//! whiteboard event types, is accepted-but-ignored on the wire — the server
//! always substitutes the session's current room before validation. Same
//! for `timestamp`, which is always server-overwritten. Both are kept
//! optional here purely so a client that naively echoes its own fields back
//! doesn't get rejected for sending them.

use serde::Deserialize;

use crate::event::{EventKind, Point, Rect};

/// Body of a `JOIN_ROOM`/`LEAVE_ROOM` frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinLeaveBody {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Room to join or leave.
    pub room_id: String,
}

/// Body of a `DRAW_LINE` frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawLineBody {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Accepted but ignored; the server substitutes the session's room.
    pub room_id: Option<String>,
    /// Accepted but ignored; the server stamps its own wall-clock time.
    pub timestamp: Option<i64>,
    /// The stroke's sampled coordinates, in order.
    pub points: Vec<Point>,
    /// CSS-style color string (e.g. `#FF0000`).
    pub color: String,
    /// Line width in canvas units.
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

/// Body of a `DRAW_PATH` frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawPathBody {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Accepted but ignored; the server substitutes the session's room.
    pub room_id: Option<String>,
    /// Accepted but ignored; the server stamps its own wall-clock time.
    pub timestamp: Option<i64>,
    /// The stroke's sampled coordinates, in order.
    pub path: Vec<Point>,
    /// CSS-style color string (e.g. `#FF0000`).
    pub color: String,
    /// Line width in canvas units.
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

/// Body of an `ERASE` frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EraseBody {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Accepted but ignored; the server substitutes the session's room.
    pub room_id: Option<String>,
    /// Accepted but ignored; the server stamps its own wall-clock time.
    pub timestamp: Option<i64>,
    /// The region to clear.
    pub region: Rect,
}

/// Body of a `CLEAR_CANVAS` frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearCanvasBody {
    /// Opaque, non-empty client identifier.
    pub user_id: String,
    /// Accepted but ignored; the server substitutes the session's room.
    pub room_id: Option<String>,
    /// Accepted but ignored; the server stamps its own wall-clock time.
    pub timestamp: Option<i64>,
}

/// Every frame a client may send, dispatched by its `type` tag.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientFrame {
    /// Move this session into the named room.
    JoinRoom(JoinLeaveBody),
    /// Remove this session from the named room.
    LeaveRoom(JoinLeaveBody),
    /// Submit a `DRAW_LINE` event to the session's current room.
    DrawLine(DrawLineBody),
    /// Submit a `DRAW_PATH` event to the session's current room.
    DrawPath(DrawPathBody),
    /// Submit an `ERASE` event to the session's current room.
    Erase(EraseBody),
    /// Submit a `CLEAR_CANVAS` event to the session's current room.
    ClearCanvas(ClearCanvasBody),
}

impl ClientFrame {
    /// The `userId` carried by every frame variant.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::JoinRoom(b) | Self::LeaveRoom(b) => &b.user_id,
            Self::DrawLine(b) => &b.user_id,
            Self::DrawPath(b) => &b.user_id,
            Self::Erase(b) => &b.user_id,
            Self::ClearCanvas(b) => &b.user_id,
        }
    }

    /// Turn a whiteboard-event frame into an `EventKind`, discarding the
    /// client-supplied `roomId`/`timestamp` which are never trusted.
    ///
    /// Returns `None` for `JOIN_ROOM`/`LEAVE_ROOM`, which are control frames
    /// and have no event-log representation.
    #[must_use]
    pub fn into_event_kind(self) -> Option<EventKind> {
        match self {
            Self::JoinRoom(_) | Self::LeaveRoom(_) => None,
            Self::DrawLine(b) => Some(EventKind::DrawLine {
                points: b.points,
                color: b.color,
                stroke_width: b.stroke_width,
            }),
            Self::DrawPath(b) => {
                Some(EventKind::DrawPath { path: b.path, color: b.color, stroke_width: b.stroke_width })
            },
            Self::Erase(b) => Some(EventKind::Erase { region: b.region }),
            Self::ClearCanvas(_) => Some(EventKind::ClearCanvas),
        }
    }
}
