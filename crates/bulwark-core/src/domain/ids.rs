//! Event identifiers.
//!
//! ULID ベース: 時刻でソート可能、調整なしで生成可能。Subscribers can use
//! the id to de-duplicate an event they saw through more than one bus.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Ulid);

impl EventId {
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for EventId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}
