//! IdGenerator port - ID 生成の抽象化

use ulid::Ulid;

use crate::domain::EventId;
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn generate_event_id(&self) -> EventId;
}

/// ULID generator driven by a `Clock`, so a `FixedClock` pins the
/// timestamp half of every id.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_event_id(&self) -> EventId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        EventId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);
        assert_ne!(id_gen.generate_event_id(), id_gen.generate_event_id());
    }

    #[test]
    fn fixed_clock_pins_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(at));

        let a = id_gen.generate_event_id();
        let b = id_gen.generate_event_id();
        assert_ne!(a, b);
        assert_eq!(a.as_ulid().timestamp_ms(), at.timestamp_millis() as u64);
        assert_eq!(b.as_ulid().timestamp_ms(), at.timestamp_millis() as u64);
        assert!(a.to_string().starts_with("event-"));
    }
}
