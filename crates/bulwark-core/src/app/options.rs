//! Per-call options for the retry executor.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::cancel::CancelSignal;
use crate::domain::RawError;

/// Called before each backoff wait with `(error, attempt, delay)`.
/// Notification only; it cannot change what happens next.
pub type RetryHook = Arc<dyn Fn(&RawError, u32, Duration) + Send + Sync>;

#[derive(Clone, Default)]
pub struct RetryOptions {
    pub max_retries: Option<u32>,
    pub base_delay: Option<Duration>,
    pub on_retry: Option<RetryHook>,
    pub cancel: Option<CancelSignal>,
}

impl RetryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = Some(base_delay);
        self
    }

    pub fn on_retry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RawError, u32, Duration) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(hook));
        self
    }

    pub fn cancel_on(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("on_retry", &self.on_retry.as_ref().map(|_| "<hook>"))
            .field("cancel", &self.cancel)
            .finish()
    }
}
