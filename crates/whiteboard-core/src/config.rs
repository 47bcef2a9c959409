//! Room-pipeline configuration constants (§6.3).
//!
//! Passed explicitly to every constructor that needs it — no ambient global
//! config singleton (§9).

/// Tunables for the Validator, Resolver and Event Log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// Minimum inter-`CLEAR_CANVAS` timestamp gap, in milliseconds.
    pub clear_cooldown_ms: i64,
    /// Soft cap on events retained per room before `Saturated`.
    pub max_events_per_room: usize,
    /// Reject frames serialized larger than this, in bytes.
    pub max_event_size_bytes: usize,
    /// Reject `DRAW_LINE`/`DRAW_PATH` with more points/path entries than this.
    pub max_points_per_event: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            clear_cooldown_ms: 1000,
            max_events_per_room: 10_000,
            max_event_size_bytes: 100 * 1024,
            max_points_per_event: 1000,
        }
    }
}
