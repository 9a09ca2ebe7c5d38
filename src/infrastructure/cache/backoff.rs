//! Reconnect delay policy.

use std::time::Duration;

/// Linear-growth backoff: `base * attempt`, capped at `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub cap: Duration,
}

impl Backoff {
    pub const fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }

    /// Transport-layer reconnects: 50 ms per attempt, at most 2 s.
    pub const fn transport() -> Self {
        Self::new(Duration::from_millis(50), Duration::from_secs(2))
    }

    /// Sentinel discovery retries: 100 ms per attempt, at most 2 s.
    pub const fn discovery() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(2))
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt.max(1)).min(self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_grows_with_attempts() {
        let b = Backoff::transport();
        assert_eq!(b.delay(1), Duration::from_millis(50));
        assert_eq!(b.delay(2), Duration::from_millis(100));
        assert_eq!(b.delay(10), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_is_capped() {
        let b = Backoff::transport();
        assert_eq!(b.delay(40), Duration::from_secs(2));
        assert_eq!(b.delay(u32::MAX), Duration::from_secs(2));
    }

    #[test]
    fn test_attempt_zero_behaves_like_first() {
        assert_eq!(Backoff::discovery().delay(0), Duration::from_millis(100));
    }
}
