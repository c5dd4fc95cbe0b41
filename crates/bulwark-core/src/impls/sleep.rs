//! Sleeper implementations.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::ports::Sleeper;

/// Timer-based wait on the tokio runtime; other tasks keep running.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Records requested delays and returns immediately (yielding once).
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().push(delay);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_sleeper_keeps_order() {
        let s = RecordingSleeper::new();
        s.sleep(Duration::from_millis(10)).await;
        s.sleep(Duration::from_millis(20)).await;
        assert_eq!(s.delays(), vec![Duration::from_millis(10), Duration::from_millis(20)]);
    }

    #[tokio::test]
    async fn tokio_sleeper_waits() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(5)).await;
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
