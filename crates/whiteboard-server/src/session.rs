//! Session state (component H): one per open websocket connection.

use tokio::sync::mpsc;
use whiteboard_core::env::Environment;
use whiteboard_proto::ServerMessage;

/// Outbound messages are buffered on a bounded channel; a session that falls
/// behind the fan-out rate is disconnected rather than allowed to grow
/// unboundedly (§5 backpressure).
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 256;

/// A connected client. Owns the outbound sender half of its socket's
/// message channel and tracks which room (if any) it currently occupies.
pub struct Session {
    id: u64,
    outbound: mpsc::Sender<ServerMessage>,
    room: Option<String>,
}

impl Session {
    /// Creates a session with a fresh random id, returning it paired with
    /// the receiver half the transport task should forward to the socket.
    pub fn new<E: Environment>(env: &E) -> (Self, mpsc::Receiver<ServerMessage>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_CHANNEL_CAPACITY);
        #[allow(clippy::cast_possible_truncation)]
        let id = env.random_u128() as u64;
        (Self { id, outbound: tx, room: None }, rx)
    }

    /// This session's id, used as the Membership Table's session key and
    /// surfaced to the client in the `CONNECTED` frame.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// A session id rendered as a fixed-width hex string, used in the wire
    /// protocol's `sessionId` field.
    #[must_use]
    pub fn id_hex(&self) -> String {
        format!("{:016x}", self.id)
    }

    /// The room this session currently occupies, if any.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Records that this session has joined `room_id`. Does not touch the
    /// Membership Table; callers update both together.
    pub fn set_room(&mut self, room_id: Option<String>) {
        self.room = room_id;
    }

    /// Enqueues a message for delivery to this session's socket.
    ///
    /// Returns `false` if the outbound channel is full or the receiver has
    /// already been dropped (the transport task is shutting down), in
    /// which case the caller should treat this session as disconnected
    /// rather than block.
    pub fn try_send(&self, message: ServerMessage) -> bool {
        self.outbound.try_send(message).is_ok()
    }

    /// A clone of this session's outbound sender, handed to the Broadcaster
    /// so room events reach this socket without the Broadcaster knowing
    /// anything about `Session` itself.
    #[must_use]
    pub fn outbound_sender(&self) -> mpsc::Sender<ServerMessage> {
        self.outbound.clone()
    }
}
