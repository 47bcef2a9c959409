//! Ties Registry (F), Membership (G), and Broadcaster (I) together into the
//! single surface the transport and admin-HTTP layers call into.
//!
//! Unlike the driver this is descended from, there is no event/action
//! indirection here: there is no simulation runtime to replay actions
//! against, so each method performs its effects directly. What is kept is
//! the driver's job of being the one place that knows how the pieces fit
//! together, so transport.rs and http.rs never touch the Registry or
//! Membership Table directly.

use std::sync::Arc;

use whiteboard_core::{CoreConfig, CoreError};
use whiteboard_proto::{Candidate, Event, ServerMessage};

use crate::{broadcast::Broadcaster, membership::MembershipTable, registry::RoomRegistry};

/// Shared application state: one instance per running server, reached by
/// both the websocket driver and the admin HTTP surface (§9 — a single
/// shared instance, not independently-constructed services).
pub struct Hub {
    registry: RoomRegistry,
    membership: MembershipTable,
    broadcaster: Broadcaster,
    config: CoreConfig,
    max_connections: usize,
}

/// Default hard cap on concurrent sessions, matching `ServerConfig`'s
/// default (§6.3). Used by [`Hub::new`], which predates `max_connections`
/// becoming configurable; prefer [`Hub::with_max_connections`] when the
/// caller has a `ServerConfig` to hand.
const DEFAULT_MAX_CONNECTIONS: usize = 10_000;

impl Hub {
    /// Creates an empty hub with the default connection cap.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        Self::with_max_connections(config, DEFAULT_MAX_CONNECTIONS)
    }

    /// Creates an empty hub with an explicit connection cap (§6.3).
    #[must_use]
    pub fn with_max_connections(config: CoreConfig, max_connections: usize) -> Self {
        Self {
            registry: RoomRegistry::new(config),
            membership: MembershipTable::new(),
            broadcaster: Broadcaster::new(),
            config,
            max_connections,
        }
    }

    /// The room pipeline configuration (clear cooldown, log cap, size
    /// limits), used by the transport layer to validate inbound frames
    /// before they reach a room's Coordinator.
    #[must_use]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// The Room Registry.
    #[must_use]
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// The Membership Table.
    #[must_use]
    pub fn membership(&self) -> &MembershipTable {
        &self.membership
    }

    /// Registers a session's outbound channel, ready to be joined into a
    /// room and receive broadcasts.
    ///
    /// Returns `false` without registering if the server is already at its
    /// `max_connections` cap (§6.3); the caller should close the connection
    /// rather than proceed with the handshake.
    #[must_use]
    pub fn register_session(&self, session_id: u64, sender: tokio::sync::mpsc::Sender<ServerMessage>) -> bool {
        if self.broadcaster.len() >= self.max_connections {
            return false;
        }
        self.broadcaster.register(session_id, sender);
        true
    }

    /// Removes a session entirely: drops its outbound channel and leaves
    /// whichever room it occupied.
    pub fn disconnect_session(&self, session_id: u64) {
        self.membership.disconnect(session_id);
        self.broadcaster.unregister(session_id);
    }

    /// Handles a `JOIN_ROOM` request: moves the session's membership,
    /// snapshots the room's current state, and replies with `ROOM_JOINED`
    /// addressed to only this session (§4.H/§6.1).
    ///
    /// # Panics
    ///
    /// Panics if the room's Coordinator lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn join_room(&self, session_id: u64, room_id: &str) {
        self.membership.join(room_id, session_id);
        let room = self.registry.get_or_create(room_id);
        let coordinator = room.lock().expect("room lock poisoned");
        let state = coordinator.state();
        let user_count = self.membership.members_of(room_id).len();
        tracing::debug!(session_id, room_id, user_count, "session joined room");
        let message = ServerMessage::RoomJoined {
            room_id: room_id.to_owned(),
            user_count,
            state_event_count: state.len(),
            state,
        };
        self.broadcaster.send_to(session_id, message);
    }

    /// Handles a `LEAVE_ROOM` request.
    pub fn leave_room(&self, session_id: u64, room_id: &str) {
        self.membership.leave(room_id, session_id);
        tracing::debug!(session_id, room_id, "session left room");
    }

    /// Submits a candidate event into its room (validation already done by
    /// the caller) and broadcasts the accepted, sequenced event to every
    /// member of the room, including the sender.
    ///
    /// # Errors
    ///
    /// Propagates the room's rejection (conflict or saturation) so the
    /// caller can reply with an `ERROR` frame to just the originating
    /// session.
    ///
    /// # Panics
    ///
    /// Panics if the room's Coordinator lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn submit_event(&self, candidate: Candidate) -> Result<Event, CoreError> {
        let room = self.registry.get_or_create(&candidate.room_id);
        let room_id = candidate.room_id.clone();
        let user_id = candidate.user_id.clone();
        let accepted = {
            let mut coordinator = room.lock().expect("room lock poisoned");
            match coordinator.submit(candidate) {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::debug!(room_id, user_id, error = %err, "event rejected");
                    return Err(err);
                }
            }
        };
        tracing::debug!(room_id, user_id, sequence = accepted.sequence, "event accepted");
        let unreachable = self.broadcaster.publish(&self.membership, &room_id, &ServerMessage::Event(accepted.clone()), None);
        if !unreachable.is_empty() {
            tracing::warn!(room_id, ?unreachable, "broadcast could not reach some room members");
        }
        Ok(accepted)
    }

    /// Sends an `ERROR` frame to a single session.
    pub fn send_error(&self, session_id: u64, message: impl Into<String>) {
        self.broadcaster.send_to(session_id, ServerMessage::error(message));
    }

    /// Sends a `CONNECTED` frame to a single session.
    pub fn send_connected(&self, session_id: u64, session_id_hex: impl Into<String>) {
        self.broadcaster.send_to(session_id, ServerMessage::connected(session_id_hex));
    }

    /// Snapshot of currently active room ids, for `GET /rooms`.
    #[must_use]
    pub fn list_rooms(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Full or incremental state for `GET /rooms/:roomId/state` and
    /// `GET /events/:roomId`. Returns `None` if the room has never been
    /// created.
    ///
    /// # Panics
    ///
    /// Panics if the room's Coordinator lock is poisoned.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn room_state(&self, room_id: &str, after: Option<u64>) -> Option<Vec<Event>> {
        let room = self.registry.get(room_id)?;
        let coordinator = room.lock().expect("room lock poisoned");
        Some(match after {
            Some(seq) => coordinator.state_since(seq),
            None => coordinator.state(),
        })
    }

    /// Clears a room's log and sequence, for `DELETE /rooms/:roomId`.
    /// Returns `false` if the room does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the room's Coordinator lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn reset_room(&self, room_id: &str) -> bool {
        let Some(room) = self.registry.get(room_id) else {
            return false;
        };
        room.lock().expect("room lock poisoned").reset();
        true
    }
}

/// Shared, clonable handle to a [`Hub`], passed around transport tasks and
/// held in axum's router state.
pub type SharedHub = Arc<Hub>;

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use whiteboard_proto::EventKind;

    use super::*;

    fn clear_candidate(room_id: &str) -> Candidate {
        Candidate { user_id: "u1".into(), room_id: room_id.into(), timestamp: 0, kind: EventKind::ClearCanvas }
    }

    #[tokio::test]
    async fn join_room_sends_room_joined_to_the_joiner_only() {
        let hub = Hub::new(CoreConfig::default());
        let (tx, mut rx) = mpsc::channel(8);
        assert!(hub.register_session(1, tx));
        hub.join_room(1, "r1");

        let message = rx.recv().await.unwrap();
        match message {
            ServerMessage::RoomJoined { room_id, user_count, .. } => {
                assert_eq!(room_id, "r1");
                assert_eq!(user_count, 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_event_broadcasts_to_every_member_including_sender() {
        let hub = Hub::new(CoreConfig::default());
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        assert!(hub.register_session(1, tx1));
        assert!(hub.register_session(2, tx2));
        hub.join_room(1, "r1");
        hub.join_room(2, "r1");
        rx1.recv().await.unwrap(); // drain ROOM_JOINED
        rx2.recv().await.unwrap();

        hub.submit_event(clear_candidate("r1")).unwrap();
        assert!(matches!(rx1.recv().await.unwrap(), ServerMessage::Event(_)));
        assert!(matches!(rx2.recv().await.unwrap(), ServerMessage::Event(_)));
    }

    #[tokio::test]
    async fn disconnect_session_removes_it_from_future_broadcasts() {
        let hub = Hub::new(CoreConfig::default());
        let (tx, mut rx) = mpsc::channel(8);
        assert!(hub.register_session(1, tx));
        hub.join_room(1, "r1");
        rx.recv().await.unwrap();
        hub.disconnect_session(1);

        hub.submit_event(clear_candidate("r1")).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn submit_event_error_is_not_broadcast() {
        let hub = Hub::new(CoreConfig::default());
        hub.submit_event(clear_candidate("r1")).unwrap();
        let err = hub.submit_event(clear_candidate("r1")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict));
    }

    #[test]
    fn register_session_rejects_past_max_connections() {
        let hub = Hub::with_max_connections(CoreConfig::default(), 1);
        let (tx1, _rx1) = mpsc::channel(8);
        let (tx2, _rx2) = mpsc::channel(8);
        assert!(hub.register_session(1, tx1));
        assert!(!hub.register_session(2, tx2));
    }

    #[test]
    fn disconnecting_a_session_frees_a_connection_slot() {
        let hub = Hub::with_max_connections(CoreConfig::default(), 1);
        let (tx1, _rx1) = mpsc::channel(8);
        let (tx2, _rx2) = mpsc::channel(8);
        assert!(hub.register_session(1, tx1));
        hub.disconnect_session(1);
        assert!(hub.register_session(2, tx2));
    }
}
