//! Broadcast Fan-out (component I).
//!
//! Delivers a `ServerMessage` to every session currently in a room,
//! including the session that originated the event (§4.I) — clients apply
//! the server's accepted/sequenced copy rather than assuming their own
//! optimistic write was final.

use std::{collections::HashMap, sync::Mutex};

use whiteboard_proto::ServerMessage;

use crate::membership::MembershipTable;

type Outbox = HashMap<u64, tokio::sync::mpsc::Sender<ServerMessage>>;

/// Per-session outbound channels, keyed by session id. Kept separate from
/// `MembershipTable` since membership is about room occupancy while this is
/// about delivery, and a session can be briefly registered here before it
/// has joined any room.
#[derive(Default)]
pub struct Broadcaster {
    outboxes: Mutex<Outbox>,
}

impl Broadcaster {
    /// Creates an empty broadcaster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session's outbound channel so it can receive broadcasts.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn register(&self, session_id: u64, sender: tokio::sync::mpsc::Sender<ServerMessage>) {
        self.outboxes.lock().expect("broadcaster lock poisoned").insert(session_id, sender);
    }

    /// Removes a session's outbound channel, typically on disconnect.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn unregister(&self, session_id: u64) {
        self.outboxes.lock().expect("broadcaster lock poisoned").remove(&session_id);
    }

    /// Number of sessions currently registered, used to enforce the
    /// server's `max_connections` cap (§6.3).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.outboxes.lock().expect("broadcaster lock poisoned").len()
    }

    /// Returns true if no sessions are currently registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sends `message` to every session currently a member of `room_id`,
    /// per the membership table's present snapshot, except `exclude` if
    /// given. Present for generality — the room-event path always passes
    /// `None` since accepted events are echoed back to their own sender
    /// too (§4.I) — but kept so a future broadcast that must skip the
    /// originator doesn't need a second fan-out primitive.
    ///
    /// Returns the ids of sessions whose outbound channel was full or
    /// closed; the caller should treat those as disconnected.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn publish(&self, membership: &MembershipTable, room_id: &str, message: &ServerMessage, exclude: Option<u64>) -> Vec<u64> {
        let members = membership.members_of(room_id);
        let outboxes = self.outboxes.lock().expect("broadcaster lock poisoned");
        let mut unreachable = Vec::new();
        for session_id in members {
            if Some(session_id) == exclude {
                continue;
            }
            match outboxes.get(&session_id) {
                Some(sender) if sender.try_send(message.clone()).is_ok() => {}
                _ => unreachable.push(session_id),
            }
        }
        unreachable
    }

    /// Sends `message` to a single session directly, bypassing membership.
    /// Used for the `CONNECTED` and per-request `ERROR` frames, which are
    /// addressed to one session rather than broadcast to a room.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn send_to(&self, session_id: u64, message: ServerMessage) -> bool {
        match self.outboxes.lock().expect("broadcaster lock poisoned").get(&session_id) {
            Some(sender) => sender.try_send(message).is_ok(),
            None => false,
        }
    }
}
