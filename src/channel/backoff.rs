//! Reconnect delay policy

use std::time::Duration;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(5000);

/// Capped exponential backoff with no attempt limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub initial: Duration,
    pub max: Duration,
}

impl ReconnectPolicy {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
        }
    }

    /// Delay before retrying after `failures` consecutive failed attempts
    pub fn delay(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.initial
            .saturating_mul(1_u32 << exponent)
            .min(self.max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY, DEFAULT_MAX_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence() {
        let policy = ReconnectPolicy::default();
        let delays: Vec<u64> = (1..=6).map(|n| policy.delay(n).as_millis() as u64).collect();
        assert_eq!(delays, vec![500, 1000, 2000, 4000, 5000, 5000]);
    }

    #[test]
    fn test_never_exceeds_cap() {
        let policy = ReconnectPolicy::default();
        for failures in [0, 1, 10, 31, 32, 1_000, u32::MAX] {
            let delay = policy.delay(failures);
            assert!(delay <= DEFAULT_MAX_DELAY);
            assert!(delay >= DEFAULT_INITIAL_DELAY);
        }
    }

    #[test]
    fn test_max_below_initial_is_raised() {
        let policy = ReconnectPolicy::new(Duration::from_millis(300), Duration::from_millis(100));
        assert_eq!(policy.max, Duration::from_millis(300));
        assert_eq!(policy.delay(5), Duration::from_millis(300));
    }
}
