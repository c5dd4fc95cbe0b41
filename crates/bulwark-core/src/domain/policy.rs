//! Retry policy: attempt budget and backoff delays.

use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Exponential backoff without jitter: `base_delay * 2^(attempt - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_retries: u32,

    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            // the operation always runs at least once
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Delay scheduled after `attempt` (1-based) fails.
    ///
    /// - attempt 1: base
    /// - attempt 2: base * 2
    /// - attempt 3: base * 4
    ///
    /// Saturates instead of overflowing for absurd attempt numbers.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        match 1u32.checked_shl(exponent) {
            Some(factor) => self.base_delay.checked_mul(factor).unwrap_or(Duration::MAX),
            None => Duration::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn exponential_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(1), Duration::from_millis(1000));
        assert_eq!(policy.next_delay(2), Duration::from_millis(2000));
        assert_eq!(policy.next_delay(3), Duration::from_millis(4000));
    }

    #[test]
    fn attempt_zero_uses_base_delay() {
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        assert_eq!(policy.next_delay(0), Duration::from_millis(250));
    }

    #[test]
    fn huge_attempt_numbers_saturate() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(200), Duration::MAX);
        assert_eq!(policy.next_delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn shift_overflow_saturates_at_attempt_33() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        assert_eq!(policy.next_delay(32), Duration::from_millis(1 << 31));
        assert_eq!(policy.next_delay(33), Duration::MAX);
    }

    #[test]
    fn zero_max_retries_is_clamped() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_BASE_DELAY).max_retries, 1);
    }
}
