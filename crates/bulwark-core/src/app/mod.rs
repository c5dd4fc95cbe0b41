//! App - アプリケーション層
//!
//! Wires the domain rules to the injected ports.
//!
//! # 主要コンポーネント
//! - **ServiceBuilder**: construction and fail-fast validation
//! - **ResilienceService**: sync/async wrappers, retry executor, fallback executor, notifications
//! - **RetryOptions**: per-call overrides for the retry executor
//! - **cancel**: cancellation signal for retry runs

pub mod builder;
pub mod cancel;
pub mod options;
pub mod service;

pub use self::builder::{BuildError, ServiceBuilder};
pub use self::cancel::{CancelHandle, CancelSignal, cancellation};
pub use self::options::{RetryHook, RetryOptions};
pub use self::service::ResilienceService;
