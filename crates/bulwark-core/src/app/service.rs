//! ResilienceService - エラー処理・リトライ・フォールバック
//!
//! Public entry points never return `Err` and never panic on operation
//! failure: every failure ends up as a `Failure` inside the returned
//! `OperationOutcome`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::builder::ServiceBuilder;
use super::options::RetryOptions;
use crate::config::ResilienceConfig;
use crate::domain::{
    DEFAULT_SOURCE, Decision, ErrorCode, ErrorContext, ErrorEvent, ErrorRecord, Failure, Notice,
    OperationOutcome, RawError, ReportOptions, RetryPolicy, Severity, Success, normalize,
    normalize_with, should_retry,
};
use crate::ports::{Clock, EventSink, IdGenerator, Presenter, RetryDecider, Sleeper};

/// Context key recording the code a retry run ended with before it was
/// relabelled `RETRY_EXHAUSTED`.
pub const ORIGINAL_CODE_KEY: &str = "originalCode";

pub struct ResilienceService {
    pub(super) config: ResilienceConfig,
    pub(super) policy: RetryPolicy,
    pub(super) event_sink: Option<Arc<dyn EventSink>>,
    pub(super) presenter: Option<Arc<dyn Presenter>>,
    pub(super) decider: Arc<dyn RetryDecider>,
    pub(super) sleeper: Arc<dyn Sleeper>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn IdGenerator>,
}

impl ResilienceService {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn config(&self) -> &ResilienceConfig {
        &self.config
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn normalize(&self, error: &RawError) -> ErrorRecord {
        normalize(error)
    }

    /// Normalize, merge the caller's context, log and emit.
    pub fn handle_error(&self, error: impl Into<RawError>, context: &ErrorContext) -> Failure {
        let record = normalize_with(&error.into(), context);
        self.publish(record.into_failure())
    }

    pub fn handle_sync<T, E, F>(&self, op: F, context: &ErrorContext) -> OperationOutcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<RawError>,
    {
        match op() {
            Ok(data) => OperationOutcome::success(data),
            Err(e) => OperationOutcome::Failure(self.handle_error(e, context)),
        }
    }

    pub async fn handle_async<T, E, F, Fut>(
        &self,
        op: F,
        context: &ErrorContext,
    ) -> OperationOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        match op().await {
            Ok(data) => OperationOutcome::success(data),
            Err(e) => OperationOutcome::Failure(self.handle_error(e, context)),
        }
    }

    /// Run `op` with bounded exponential-backoff retry.
    ///
    /// Attempts are strictly sequential. When the run gives up, the outcome
    /// is `RETRY_EXHAUSTED` with `attempts == max_retries`, even if it gave up
    /// early because the error was not retryable.
    pub async fn handle_async_with_retry<T, E, F, Fut>(
        &self,
        mut op: F,
        context: &ErrorContext,
        options: RetryOptions,
    ) -> OperationOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        let policy = RetryPolicy::new(
            options.max_retries.unwrap_or(self.policy.max_retries),
            options.base_delay.unwrap_or(self.policy.base_delay),
        );

        let mut attempt = 0;
        let last_error = loop {
            attempt += 1;

            let result = match &options.cancel {
                Some(signal) => tokio::select! {
                    biased;
                    _ = signal.cancelled() => return self.cancelled(attempt, context),
                    result = op() => result,
                },
                None => op().await,
            };

            let error: RawError = match result {
                Ok(data) => return OperationOutcome::success(data).with_attempts(attempt),
                Err(e) => e.into(),
            };

            match self.decider.decide(&error, attempt, &policy) {
                Decision::Retry { delay, reason } if attempt < policy.max_retries => {
                    if let Some(hook) = &options.on_retry {
                        hook(&error, attempt, delay);
                    }
                    if self.config.log_errors {
                        warn!(
                            attempt,
                            max_retries = policy.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            %reason,
                            "operation failed, retrying"
                        );
                    }
                    match &options.cancel {
                        Some(signal) => tokio::select! {
                            biased;
                            _ = signal.cancelled() => return self.cancelled(attempt, context),
                            _ = self.sleeper.sleep(delay) => {}
                        },
                        None => self.sleeper.sleep(delay).await,
                    }
                }
                Decision::Retry { reason, .. } | Decision::GiveUp { reason } => {
                    debug!(attempt, %reason, "giving up");
                    break error;
                }
            }
        };

        let mut record = normalize_with(&last_error, context);
        record.context.insert(ORIGINAL_CODE_KEY, record.code.as_str());
        record.code = ErrorCode::RetryExhausted;

        let mut failure = record.into_failure();
        failure.attempts = Some(policy.max_retries);
        OperationOutcome::Failure(self.publish(failure))
    }

    /// Run `primary`; on failure run `fallback` once. No retry in here.
    pub async fn handle_with_fallback<T, E1, E2, F1, Fut1, F2, Fut2>(
        &self,
        primary: F1,
        fallback: F2,
        context: &ErrorContext,
    ) -> OperationOutcome<T>
    where
        F1: FnOnce() -> Fut1,
        Fut1: Future<Output = Result<T, E1>>,
        E1: Into<RawError>,
        F2: FnOnce() -> Fut2,
        Fut2: Future<Output = Result<T, E2>>,
        E2: Into<RawError>,
    {
        let primary_error = match primary().await {
            Ok(data) => {
                let mut success = Success::new(data);
                success.used_fallback = Some(false);
                return OperationOutcome::Success(success);
            }
            Err(e) => normalize(&e.into()),
        };

        match fallback().await {
            Ok(data) => {
                if self.config.log_errors {
                    warn!(
                        source = context.source().unwrap_or(DEFAULT_SOURCE),
                        primary_code = %primary_error.code,
                        primary_error = %primary_error.message,
                        "primary operation failed, fallback used"
                    );
                }
                OperationOutcome::Success(Success {
                    data,
                    attempts: None,
                    used_fallback: Some(true),
                    code: Some(ErrorCode::FallbackUsed),
                    primary_error: Some(primary_error.message),
                })
            }
            Err(e) => {
                let both_failed = context
                    .clone()
                    .with("primaryError", primary_error.message.clone())
                    .with("primaryCode", primary_error.code.as_str())
                    .with("fallbackFailed", true);
                let mut failure = normalize_with(&e.into(), &both_failed).into_failure();
                failure.primary_error = Some(primary_error.message);
                OperationOutcome::Failure(self.publish(failure))
            }
        }
    }

    pub fn should_retry(&self, error: &RawError, attempt: u32, max_retries: u32) -> bool {
        should_retry(error, attempt, max_retries)
    }

    pub fn get_retry_delay(&self, attempt: u32) -> Duration {
        self.policy.next_delay(attempt)
    }

    /// Friendly text for `error`; a `userMessage` string in the context wins.
    pub fn get_user_message(&self, error: &RawError, context: &ErrorContext) -> String {
        if let Some(custom) = context.get_str(ErrorContext::USER_MESSAGE) {
            return custom.to_string();
        }
        normalize(error).code.user_message().to_string()
    }

    pub fn determine_severity(&self, record: &ErrorRecord) -> Severity {
        record.code.severity()
    }

    /// Full notification path: handle the error, build a `Notice` and hand
    /// it to the presenter, if one is configured.
    pub fn report(
        &self,
        error: impl Into<RawError>,
        context: &ErrorContext,
        options: &ReportOptions,
    ) -> Notice {
        let raw = error.into();
        let message = self.get_user_message(&raw, context);
        let failure = self.handle_error(raw, context);
        let notice = Notice::build(message, failure.code, failure.code.severity(), options);
        if let Some(presenter) = &self.presenter {
            presenter.present(&notice);
        }
        notice
    }

    fn cancelled<T>(&self, attempt: u32, context: &ErrorContext) -> OperationOutcome<T> {
        if self.config.log_errors {
            info!(attempt, "operation cancelled");
        }
        let mut failure = ErrorRecord::new("Operation was cancelled", ErrorCode::Cancelled)
            .with_context(context)
            .into_failure();
        failure.attempts = Some(attempt);
        OperationOutcome::Failure(failure)
    }

    fn publish(&self, failure: Failure) -> Failure {
        if self.config.log_errors {
            log_failure(&failure);
        }
        if self.config.emit_events {
            if let Some(sink) = &self.event_sink {
                let id = self.ids.generate_event_id();
                sink.emit(ErrorEvent::new(id, failure.clone(), self.clock.now()));
            }
        }
        failure
    }
}

fn log_failure(failure: &Failure) {
    let source = failure.context.source().unwrap_or(DEFAULT_SOURCE);
    let code = failure.code;
    let recoverable = failure.recoverable;
    match code.severity() {
        Severity::Critical | Severity::Error => {
            error!(%code, source, recoverable, attempts = failure.attempts, "{}", failure.error)
        }
        Severity::Warning => {
            warn!(%code, source, recoverable, attempts = failure.attempts, "{}", failure.error)
        }
        Severity::Info => {
            info!(%code, source, recoverable, "{}", failure.error)
        }
    }
}
