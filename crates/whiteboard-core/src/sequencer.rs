//! Sequence Allocator (component A).
//!
//! One allocator lives inside each room's Coordinator, so it needs no lock
//! of its own — the Coordinator is the single writer (§4.A).

/// Monotonic per-room counter, strictly increasing from 1.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    last: u64,
}

impl SequenceAllocator {
    /// Creates a counter at 0 (the first `next()` call returns 1).
    #[must_use]
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns the next sequence number and advances the counter.
    ///
    /// # Panics
    ///
    /// Panics on `u64` overflow, which would require more than `u64::MAX`
    /// accepted events in a single room's lifetime.
    pub fn next(&mut self) -> u64 {
        self.last = self.last.checked_add(1).unwrap_or_else(|| {
            unreachable!("sequence counter overflowed u64 — more than u64::MAX events in one room")
        });
        self.last
    }

    /// The last assigned sequence number, 0 if none yet.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.last
    }

    /// Resets the counter to 0 (administrative reset).
    pub fn reset(&mut self) {
        self.last = 0;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn starts_at_one() {
        let mut seq = SequenceAllocator::new();
        assert_eq!(seq.next(), 1);
    }

    #[test]
    fn increments_by_one() {
        let mut seq = SequenceAllocator::new();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        assert_eq!(seq.next(), 3);
    }

    #[test]
    fn current_reads_without_mutating() {
        let mut seq = SequenceAllocator::new();
        seq.next();
        seq.next();
        assert_eq!(seq.current(), 2);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut seq = SequenceAllocator::new();
        seq.next();
        seq.next();
        seq.reset();
        assert_eq!(seq.current(), 0);
        assert_eq!(seq.next(), 1);
    }

    proptest! {
        /// `n` draws from a fresh allocator are exactly `1..=n`, in order,
        /// with no gaps or repeats (§8).
        #[test]
        fn n_draws_are_one_through_n(n in 1usize..500) {
            let mut seq = SequenceAllocator::new();
            let draws: Vec<u64> = (0..n).map(|_| seq.next()).collect();
            let expected: Vec<u64> = (1..=n as u64).collect();
            prop_assert_eq!(draws, expected);
        }
    }
}
