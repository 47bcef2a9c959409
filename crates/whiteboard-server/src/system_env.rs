//! Production `Environment` implementation using system time and RNG.

use std::time::Duration;

use whiteboard_core::env::Environment;

/// Production environment using real system time and an OS-backed
/// cryptographic RNG.
///
/// # Panics
///
/// `random_bytes` panics if the OS RNG fails. A server without functioning
/// randomness cannot safely generate session ids and should not continue
/// running; this failure mode is extremely rare.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Creates a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    #[allow(clippy::disallowed_methods, clippy::expect_used)]
    fn unix_millis(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_millis() as i64
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - server cannot operate securely");
    }
}
