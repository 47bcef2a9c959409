//! Environment abstraction for deterministic testing.
//!
//! Decouples room logic from system resources (time, randomness) so tests can
//! run with a fake clock and seeded RNG while production uses real ones.

use std::time::Duration;

/// Abstract environment providing time, randomness, and async primitives.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards.
/// - `unix_millis()` never goes backwards.
/// - `random_bytes()` uses cryptographically secure entropy in production.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current monotonic time, used for heartbeat/idle-timeout bookkeeping.
    fn now(&self) -> Self::Instant;

    /// Current wall-clock time in milliseconds since the Unix epoch.
    ///
    /// This is the server-authoritative clock stamped onto every event on
    /// ingress (§4.B): the client-supplied timestamp is never trusted.
    fn unix_millis(&self) -> i64;

    /// Sleeps for the specified duration.
    ///
    /// This is the only async method in the trait; it exists for driver code
    /// (heartbeat ticks), not for room logic, which never suspends.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Generates a random `u128`, used for session ids.
    fn random_u128(&self) -> u128 {
        let mut bytes = [0u8; 16];
        self.random_bytes(&mut bytes);
        u128::from_be_bytes(bytes)
    }
}
