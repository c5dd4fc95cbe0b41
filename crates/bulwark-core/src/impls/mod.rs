//! Impls - port の実装
//!
//! - **BroadcastEventSink**: tokio broadcast channel as the shared event bus
//! - **RecordingEventSink / RecordingPresenter / RecordingSleeper**: in-memory, for tests and
//!   diagnostics
//! - **TracingPresenter**: notices rendered as log lines
//! - **TokioSleeper**: non-blocking timer wait

pub mod broadcast;
pub mod recording;
pub mod sleep;
pub mod tracing_presenter;

pub use self::broadcast::BroadcastEventSink;
pub use self::recording::{RecordingEventSink, RecordingPresenter};
pub use self::sleep::{RecordingSleeper, TokioSleeper};
pub use self::tracing_presenter::TracingPresenter;
