//! RetryDecider port - 失敗から次の行動を決める
//!
//! Deciders are pure: given the failed attempt they return a `Decision`
//! without side effects. The executor carries it out (hook, wait, retry).

use crate::domain::{Decision, RawError, RetryPolicy, should_retry};

pub trait RetryDecider: Send + Sync {
    /// `attempt` is 1-based and refers to the attempt that just failed.
    fn decide(&self, error: &RawError, attempt: u32, policy: &RetryPolicy) -> Decision;
}

/// Applies `should_retry` and the policy's exponential backoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryDecider;

impl RetryDecider for DefaultRetryDecider {
    fn decide(&self, error: &RawError, attempt: u32, policy: &RetryPolicy) -> Decision {
        if attempt >= policy.max_retries {
            return Decision::GiveUp {
                reason: format!("Max attempts reached: {attempt}/{}", policy.max_retries),
            };
        }
        if !should_retry(error, attempt, policy.max_retries) {
            return Decision::GiveUp {
                reason: format!("Not retryable after attempt {attempt}"),
            };
        }
        let delay = policy.next_delay(attempt);
        Decision::Retry {
            delay,
            reason: format!(
                "Retry attempt {}/{} after {:?}",
                attempt + 1,
                policy.max_retries,
                delay
            ),
        }
    }
}
