//! Ports - 抽象化レイヤー
//!
//! Capabilities the service receives at construction instead of reaching for
//! globals: where events go, how notices are shown, how backoff waits, what
//! time it is, and how retry decisions are made.

pub mod clock;
pub mod decider;
pub mod event_sink;
pub mod id_generator;
pub mod presenter;
pub mod sleeper;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::decider::{DefaultRetryDecider, RetryDecider};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::presenter::Presenter;
pub use self::sleeper::Sleeper;
