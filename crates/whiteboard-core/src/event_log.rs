//! Event Log (component D).
//!
//! Append-only, ordered, in-memory per-room log. Soft-capped at
//! `max_events`; further appends are rejected with `Saturated` rather than
//! silently dropped or ring-buffered (the reference policy, §4.D).

use whiteboard_proto::Event;

use crate::error::CoreError;

/// The per-room ordered event store.
#[derive(Debug)]
pub struct EventLog {
    events: Vec<Event>,
    max_events: usize,
}

impl EventLog {
    /// Creates an empty log with the given soft cap.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self { events: Vec::new(), max_events }
    }

    /// Appends `event` to the log.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Saturated`] if the log is already at capacity.
    /// The caller (Room Coordinator) is responsible for only ever calling
    /// this with a strictly-increasing sequence number; this method does
    /// not itself re-check ordering.
    pub fn append(&mut self, event: Event) -> Result<(), CoreError> {
        if self.events.len() >= self.max_events {
            return Err(CoreError::Saturated { capacity: self.max_events });
        }
        self.events.push(event);
        Ok(())
    }

    /// Full ordered snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Events with `sequence` strictly greater than `seq`, in order.
    ///
    /// `since(0)` is equivalent to [`Self::snapshot`].
    #[must_use]
    pub fn since(&self, seq: u64) -> Vec<Event> {
        self.events.iter().filter(|e| e.sequence > seq).cloned().collect()
    }

    /// Current length, for `stateEventCount` and the soft-cap check.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all events. Does not touch the sequence allocator; the Room
    /// Coordinator resets that separately as part of its own `reset()`.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
