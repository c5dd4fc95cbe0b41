//! Shared in-process event bus.

use tokio::sync::broadcast;

use crate::domain::ErrorEvent;
use crate::ports::EventSink;

pub const DEFAULT_CAPACITY: usize = 256;

/// Publishes every event to all current subscribers.
///
/// Slow subscribers lag (and see `RecvError::Lagged`) rather than blocking
/// the publisher.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<ErrorEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ErrorEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, event: ErrorEvent) {
        // no subscribers is not an error
        if self.tx.send(event).is_err() {
            tracing::trace!("error event dropped: no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ErrorRecord, EventId};
    use chrono::Utc;
    use ulid::Ulid;

    fn event() -> ErrorEvent {
        let failure = ErrorRecord::new("offline", ErrorCode::NetworkError).into_failure();
        ErrorEvent::new(EventId::from(Ulid::new()), failure, Utc::now())
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let bus = BroadcastEventSink::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(event());

        assert_eq!(rx1.recv().await.unwrap().data.error, "offline");
        assert_eq!(rx2.recv().await.unwrap().data.code, ErrorCode::NetworkError);
    }

    #[test]
    fn emitting_without_subscribers_is_fine() {
        let bus = BroadcastEventSink::new(4);
        bus.emit(event());
        assert_eq!(bus.subscriber_count(), 0);
    }
}
