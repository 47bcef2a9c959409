//! Room Coordinator (component E).
//!
//! Owns the Sequence Allocator and Event Log for one room and offers the
//! single `submit` entry point the rest of the system drives. Not
//! thread-safe by itself — the caller (the Room Registry, in
//! `whiteboard-server`) is responsible for serializing access per room
//! (§4.E's concurrency contract).

use whiteboard_proto::{Candidate, Event};

use crate::{config::CoreConfig, error::CoreError, event_log::EventLog, resolver, sequencer::SequenceAllocator};

/// Owns one room's Sequence Allocator and Event Log.
#[derive(Debug)]
pub struct RoomCoordinator {
    room_id: String,
    log: EventLog,
    sequencer: SequenceAllocator,
    config: CoreConfig,
}

impl RoomCoordinator {
    /// Creates a fresh, empty room.
    #[must_use]
    pub fn new(room_id: impl Into<String>, config: CoreConfig) -> Self {
        Self {
            room_id: room_id.into(),
            log: EventLog::new(config.max_events_per_room),
            sequencer: SequenceAllocator::new(),
            config,
        }
    }

    /// This room's id.
    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Runs one candidate through Resolver → Allocator → Log (§4.E steps
    /// 1-6) and returns the stored, sequenced event on success.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conflict`] if the Resolver drops the candidate,
    /// or [`CoreError::Saturated`] if the log is at capacity. Validation
    /// (`InvalidEvent`) happens before this is called — by the time a
    /// candidate reaches `submit`, its shape is already known-good.
    pub fn submit(&mut self, candidate: Candidate) -> Result<Event, CoreError> {
        let existing = self.log.snapshot();
        if let Err(err) = resolver::resolve(&existing, &candidate, &self.config) {
            tracing::debug!(room_id = %self.room_id, user_id = %candidate.user_id, error = %err, "candidate rejected by resolver");
            return Err(err);
        }

        let seq = self.sequencer.next();
        let stored = Event::from_candidate(candidate, seq);
        if let Err(err) = self.log.append(stored.clone()) {
            tracing::warn!(room_id = %self.room_id, sequence = seq, error = %err, "event log rejected accepted event");
            return Err(err);
        }
        Ok(stored)
    }

    /// Full snapshot for `ROOM_JOINED`.
    #[must_use]
    pub fn state(&self) -> Vec<Event> {
        self.log.snapshot()
    }

    /// Incremental catch-up since `seq`.
    #[must_use]
    pub fn state_since(&self, seq: u64) -> Vec<Event> {
        self.log.since(seq)
    }

    /// Number of events currently retained.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.log.len()
    }

    /// Clears the log and resets the sequence allocator (administrative
    /// delete, e.g. `DELETE /rooms/:roomId`).
    pub fn reset(&mut self) {
        self.log.clear();
        self.sequencer.reset();
    }
}

#[cfg(test)]
mod tests {
    use whiteboard_proto::EventKind;

    use super::*;

    fn draw_candidate(timestamp: i64) -> Candidate {
        Candidate {
            user_id: "u1".into(),
            room_id: "r1".into(),
            timestamp,
            kind: EventKind::DrawLine {
                points: vec![[0.0, 0.0], [1.0, 1.0]],
                color: "#112233".into(),
                stroke_width: 2.0,
            },
        }
    }

    fn clear_candidate(timestamp: i64) -> Candidate {
        Candidate { user_id: "u1".into(), room_id: "r1".into(), timestamp, kind: EventKind::ClearCanvas }
    }

    #[test]
    fn first_submit_gets_sequence_one() {
        let mut room = RoomCoordinator::new("r1", CoreConfig::default());
        let event = room.submit(draw_candidate(0)).unwrap();
        assert_eq!(event.sequence, 1);
    }

    #[test]
    fn sequences_increase_by_one_in_submit_order() {
        let mut room = RoomCoordinator::new("r1", CoreConfig::default());
        let e1 = room.submit(draw_candidate(0)).unwrap();
        let e2 = room.submit(draw_candidate(1)).unwrap();
        assert_eq!(e1.sequence, 1);
        assert_eq!(e2.sequence, 2);
    }

    #[test]
    fn rejected_candidate_does_not_consume_a_sequence_number() {
        let mut room = RoomCoordinator::new("r1", CoreConfig::default());
        room.submit(clear_candidate(0)).unwrap();
        assert_eq!(room.submit(clear_candidate(200)), Err(CoreError::Conflict));
        // Next accepted event still gets sequence 2, not 3.
        let next = room.submit(draw_candidate(2000)).unwrap();
        assert_eq!(next.sequence, 2);
    }

    #[test]
    fn state_matches_accepted_events_only() {
        let mut room = RoomCoordinator::new("r1", CoreConfig::default());
        room.submit(clear_candidate(0)).unwrap();
        let _ = room.submit(clear_candidate(100)); // rejected, conflict
        assert_eq!(room.state().len(), 1);
    }

    #[test]
    fn reset_clears_log_and_sequence() {
        let mut room = RoomCoordinator::new("r1", CoreConfig::default());
        room.submit(draw_candidate(0)).unwrap();
        room.reset();
        assert_eq!(room.event_count(), 0);
        let event = room.submit(draw_candidate(1)).unwrap();
        assert_eq!(event.sequence, 1);
    }

    #[test]
    fn saturated_room_rejects_further_submits() {
        let mut room = RoomCoordinator::new("r1", CoreConfig { max_events_per_room: 1, ..CoreConfig::default() });
        room.submit(draw_candidate(0)).unwrap();
        assert_eq!(room.submit(draw_candidate(1)), Err(CoreError::Saturated { capacity: 1 }));
    }
}
