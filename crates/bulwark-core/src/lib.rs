//! bulwark-core
//!
//! Resilience building blocks: turn arbitrary failure values into structured
//! error records, run operations with bounded exponential-backoff retry or a
//! primary/fallback chain, and map failures to user-facing notices.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（code, severity, context, raw, record, outcome, policy, decision, events, notice）
//! - **ports**: 抽象化レイヤー（EventSink, Presenter, Sleeper, Clock, IdGenerator, RetryDecider）
//! - **impls**: port の実装（BroadcastEventSink, TokioSleeper, TracingPresenter, recording 系）
//! - **app**: ResilienceService と ServiceBuilder
//! - **config**: ResilienceConfig（TOML）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{
    BuildError, CancelHandle, CancelSignal, ResilienceService, RetryOptions, ServiceBuilder,
    cancellation,
};
pub use config::{ConfigError, ResilienceConfig};
pub use domain::{
    ErrorCode, ErrorContext, ErrorEvent, ErrorRecord, Exception, Failure, Notice,
    OperationOutcome, RawError, ReportOptions, RetryPolicy, Severity, normalize,
};
