//! Membership Table (component G).
//!
//! Two coupled maps behind a single table-wide mutex: room→sessions and
//! session→room. A session is in at most one room at a time (§4.G).

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

#[derive(Debug, Default)]
struct Inner {
    rooms: HashMap<String, HashSet<u64>>,
    session_room: HashMap<u64, String>,
}

/// Tracks which sessions are in which room, and vice versa.
#[derive(Debug, Default)]
pub struct MembershipTable {
    inner: Mutex<Inner>,
}

impl MembershipTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `session` into `room_id`, first leaving any previous room.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn join(&self, room_id: &str, session: u64) {
        let mut inner = self.inner.lock().expect("membership lock poisoned");

        if let Some(previous) = inner.session_room.get(&session).cloned() {
            if previous == room_id {
                return;
            }
            remove_from_room(&mut inner.rooms, &previous, session);
        }

        inner.rooms.entry(room_id.to_owned()).or_default().insert(session);
        inner.session_room.insert(session, room_id.to_owned());
    }

    /// Removes `session` from `room_id`. A no-op if the session was not
    /// actually in that room. If the room's membership becomes empty, the
    /// room key is dropped from the membership table (the Coordinator in
    /// the Registry is unaffected — rooms outlive empty membership, §3).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn leave(&self, room_id: &str, session: u64) {
        let mut inner = self.inner.lock().expect("membership lock poisoned");
        if inner.session_room.get(&session) != Some(&room_id.to_owned()) {
            return;
        }
        remove_from_room(&mut inner.rooms, room_id, session);
        inner.session_room.remove(&session);
    }

    /// Leaves whichever room `session` is currently in, if any. Called on
    /// socket close.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    pub fn disconnect(&self, session: u64) {
        let mut inner = self.inner.lock().expect("membership lock poisoned");
        if let Some(room_id) = inner.session_room.remove(&session) {
            remove_from_room(&mut inner.rooms, &room_id, session);
        }
    }

    /// Snapshot of the sessions currently in `room_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn members_of(&self, room_id: &str) -> HashSet<u64> {
        self.inner.lock().expect("membership lock poisoned").rooms.get(room_id).cloned().unwrap_or_default()
    }

    /// The room `session` currently occupies, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn room_of(&self, session: u64) -> Option<String> {
        self.inner.lock().expect("membership lock poisoned").session_room.get(&session).cloned()
    }
}

fn remove_from_room(rooms: &mut HashMap<String, HashSet<u64>>, room_id: &str, session: u64) {
    if let Some(members) = rooms.get_mut(room_id) {
        members.remove(&session);
        if members.is_empty() {
            rooms.remove(room_id);
        }
    }
}
