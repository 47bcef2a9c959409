//! Room Registry (component F).
//!
//! A concurrent map from room id to its Coordinator. Each room gets its own
//! mutex so that, per §5's concurrency model, two different rooms proceed
//! fully in parallel — only calls against the *same* room ever contend.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use whiteboard_core::{CoreConfig, RoomCoordinator};

type RoomHandle = Arc<Mutex<RoomCoordinator>>;

/// Maps `roomId` to a per-room, independently-lockable Coordinator.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, RoomHandle>>,
    config: CoreConfig,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        Self { rooms: RwLock::new(HashMap::new()), config }
    }

    /// Returns the room's Coordinator, atomically creating it if this is
    /// the first reference (lazy room creation, §3).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (a prior holder panicked
    /// while holding it) — acceptable for an in-memory service where a
    /// poisoned lock indicates a bug elsewhere that should not be masked.
    #[allow(clippy::expect_used)]
    pub fn get_or_create(&self, room_id: &str) -> RoomHandle {
        if let Some(room) = self.rooms.read().expect("registry lock poisoned").get(room_id) {
            return Arc::clone(room);
        }

        let mut rooms = self.rooms.write().expect("registry lock poisoned");
        if !rooms.contains_key(room_id) {
            tracing::debug!(room_id, "room created");
        }
        Arc::clone(
            rooms
                .entry(room_id.to_owned())
                .or_insert_with(|| Arc::new(Mutex::new(RoomCoordinator::new(room_id, self.config)))),
        )
    }

    /// Returns the room's Coordinator if it already exists, without
    /// creating it.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn get(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms.read().expect("registry lock poisoned").get(room_id).map(Arc::clone)
    }

    /// Removes a room entirely, allowing it to be garbage-collected once no
    /// other handle is outstanding.
    #[allow(clippy::expect_used)]
    pub fn drop_room(&self, room_id: &str) -> bool {
        self.rooms.write().expect("registry lock poisoned").remove(room_id).is_some()
    }

    /// Snapshot of currently active room ids. The active-rooms set is
    /// exactly this registry's key set — there is no separate liveness
    /// flag (§4.F).
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.rooms.read().expect("registry lock poisoned").keys().cloned().collect()
    }
}
