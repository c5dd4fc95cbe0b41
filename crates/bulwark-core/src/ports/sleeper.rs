//! Sleeper port - バックオフ待機の抽象化
//!
//! Backoff waits must yield to the runtime rather than block a thread.
//! Tests swap in `RecordingSleeper` to observe delays without waiting.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}
