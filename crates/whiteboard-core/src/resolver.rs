//! Conflict Resolver (component C).
//!
//! A pure decision function: accept or drop a candidate given the room's
//! prior events. Never reads the clock — the candidate already carries its
//! server-stamped timestamp.

use whiteboard_proto::{Candidate, Event, EventKind};

use crate::{config::CoreConfig, error::CoreError};

/// Decides whether `candidate` may be appended given `log`.
///
/// Drawing events (`DRAW_LINE`, `DRAW_PATH`, `ERASE`) are always accepted.
/// `CLEAR_CANVAS` is rejected with [`CoreError::Conflict`] if the most
/// recent prior `CLEAR_CANVAS` (by timestamp) is within the configured
/// cooldown window. The comparison is strict `<`, so a clear exactly
/// `cooldown` milliseconds after the last one is accepted.
///
/// Control events never reach this function (the Coordinator handles them
/// on a separate path).
pub fn resolve(log: &[Event], candidate: &Candidate, config: &CoreConfig) -> Result<(), CoreError> {
    if !matches!(candidate.kind, EventKind::ClearCanvas) {
        return Ok(());
    }

    let last_clear_timestamp =
        log.iter().filter(|e| matches!(e.kind, EventKind::ClearCanvas)).map(|e| e.timestamp).max();

    let Some(last) = last_clear_timestamp else {
        return Ok(());
    };

    let gap = (candidate.timestamp - last).abs();
    if gap < config.clear_cooldown_ms { Err(CoreError::Conflict) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use whiteboard_proto::EventKind;

    use super::*;

    fn clear_event(timestamp: i64, sequence: u64) -> Event {
        Event {
            user_id: "u".into(),
            room_id: "r".into(),
            timestamp,
            sequence,
            kind: EventKind::ClearCanvas,
        }
    }

    fn clear_candidate(timestamp: i64) -> Candidate {
        Candidate { user_id: "u".into(), room_id: "r".into(), timestamp, kind: EventKind::ClearCanvas }
    }

    fn draw_candidate(timestamp: i64) -> Candidate {
        Candidate {
            user_id: "u".into(),
            room_id: "r".into(),
            timestamp,
            kind: EventKind::DrawLine {
                points: vec![[0.0, 0.0], [1.0, 1.0]],
                color: "#000000".into(),
                stroke_width: 1.0,
            },
        }
    }

    #[test]
    fn drawing_events_always_accepted() {
        let config = CoreConfig::default();
        let log = vec![clear_event(0, 1)];
        assert!(resolve(&log, &draw_candidate(1), &config).is_ok());
    }

    #[test]
    fn first_clear_in_empty_room_accepted() {
        let config = CoreConfig::default();
        assert!(resolve(&[], &clear_candidate(0), &config).is_ok());
    }

    #[test]
    fn second_clear_within_cooldown_rejected() {
        let config = CoreConfig::default();
        let log = vec![clear_event(1000, 1)];
        assert_eq!(resolve(&log, &clear_candidate(1200), &config), Err(CoreError::Conflict));
    }

    #[test]
    fn clear_exactly_at_cooldown_boundary_accepted() {
        let config = CoreConfig::default();
        let log = vec![clear_event(1000, 1)];
        assert!(resolve(&log, &clear_candidate(2000), &config).is_ok());
    }

    #[test]
    fn clear_outside_cooldown_accepted() {
        let config = CoreConfig::default();
        let log = vec![clear_event(0, 1)];
        assert!(resolve(&log, &clear_candidate(2000), &config).is_ok());
    }

    #[test]
    fn uses_most_recent_clear_not_first() {
        let config = CoreConfig::default();
        let log = vec![clear_event(0, 1), clear_event(5000, 2)];
        // Within cooldown of the second (most recent) clear, not the first.
        assert_eq!(resolve(&log, &clear_candidate(5200), &config), Err(CoreError::Conflict));
    }

    proptest! {
        /// Drawing candidates are accepted no matter what the log holds (§8).
        #[test]
        fn drawing_is_never_rejected(last_clear in 0i64..100_000, candidate_ts in 0i64..100_000) {
            let config = CoreConfig::default();
            let log = vec![clear_event(last_clear, 1)];
            prop_assert!(resolve(&log, &draw_candidate(candidate_ts), &config).is_ok());
        }

        /// A clear is accepted exactly when its gap from the most recent
        /// prior clear is `>= cooldown` — the boundary the hand-written
        /// tests pin at a single value holds for any cooldown/gap pair.
        #[test]
        fn clear_accepted_iff_gap_at_least_cooldown(last_clear in 0i64..1_000_000, gap in 0i64..20_000, cooldown in 1i64..20_000) {
            let config = CoreConfig { clear_cooldown_ms: cooldown, ..CoreConfig::default() };
            let log = vec![clear_event(last_clear, 1)];
            let result = resolve(&log, &clear_candidate(last_clear + gap), &config);
            if gap >= cooldown {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(CoreError::Conflict));
            }
        }

        /// Only the most recent clear's timestamp matters, regardless of how
        /// many earlier clears precede it in the log.
        #[test]
        fn only_the_latest_clear_constrains_the_next_one(earlier in proptest::collection::vec(0i64..1000, 0..10), gap in 0i64..20_000) {
            let config = CoreConfig::default();
            let latest = 1_000_000;
            let mut log: Vec<Event> = earlier.iter().enumerate().map(|(i, &ts)| clear_event(ts, i as u64 + 1)).collect();
            log.push(clear_event(latest, log.len() as u64 + 1));
            let result = resolve(&log, &clear_candidate(latest + gap), &config);
            if gap >= config.clear_cooldown_ms {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(CoreError::Conflict));
            }
        }
    }
}
