//! EventSink port - イベント送信の抽象化
//!
//! The service publishes one `ErrorEvent` per handled failure when event
//! emission is enabled. Publishing is fire-and-forget: a sink must not fail
//! the caller.

use crate::domain::ErrorEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ErrorEvent);
}

