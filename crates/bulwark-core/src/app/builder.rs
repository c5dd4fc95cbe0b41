//! ServiceBuilder - サービスの構築とワイヤリング
//!
//! Fail-fast: `build()` rejects an invalid configuration and an enabled
//! event emission with nowhere to emit to.

use std::sync::Arc;
use std::time::Duration;

use super::service::ResilienceService;
use crate::config::{ConfigError, ResilienceConfig};
use crate::impls::TokioSleeper;
use crate::ports::{
    Clock, DefaultRetryDecider, EventSink, IdGenerator, Presenter, RetryDecider, Sleeper,
    SystemClock, UlidGenerator,
};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("event emission is enabled but no event sink was provided")]
    MissingEventSink,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// ```ignore
/// let bus = BroadcastEventSink::default();
/// let service = ResilienceService::builder()
///     .max_retries(5)
///     .event_sink(Arc::new(bus.clone()))
///     .build()?;
/// ```
pub struct ServiceBuilder {
    config: ResilienceConfig,
    event_sink: Option<Arc<dyn EventSink>>,
    presenter: Option<Arc<dyn Presenter>>,
    decider: Arc<dyn RetryDecider>,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
    id_generator: Option<Arc<dyn IdGenerator>>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self {
            config: ResilienceConfig::default(),
            event_sink: None,
            presenter: None,
            decider: Arc::new(DefaultRetryDecider),
            sleeper: Arc::new(TokioSleeper),
            clock: Arc::new(SystemClock),
            id_generator: None,
        }
    }

    pub fn config(mut self, config: ResilienceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Stored in whole milliseconds; a sub-millisecond remainder rounds up.
    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        let millis = base_delay.as_nanos().div_ceil(1_000_000);
        self.config.base_delay_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn log_errors(mut self, enabled: bool) -> Self {
        self.config.log_errors = enabled;
        self
    }

    pub fn emit_events(mut self, enabled: bool) -> Self {
        self.config.emit_events = enabled;
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn decider(mut self, decider: Arc<dyn RetryDecider>) -> Self {
        self.decider = decider;
        self
    }

    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(ids);
        self
    }

    pub fn build(self) -> Result<ResilienceService, BuildError> {
        self.config.validate()?;
        if self.config.emit_events && self.event_sink.is_none() {
            return Err(BuildError::MissingEventSink);
        }
        let ids: Arc<dyn IdGenerator> = match self.id_generator {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(Arc::clone(&self.clock))),
        };

        Ok(ResilienceService {
            policy: self.config.retry_policy(),
            config: self.config,
            event_sink: self.event_sink,
            presenter: self.presenter,
            decider: self.decider,
            sleeper: self.sleeper,
            clock: self.clock,
            ids,
        })
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::RecordingEventSink;

    #[test]
    fn emission_without_sink_fails_fast() {
        let res = ServiceBuilder::new().build();
        assert!(matches!(res, Err(BuildError::MissingEventSink)));
    }

    #[test]
    fn emission_disabled_needs_no_sink() {
        assert!(ServiceBuilder::new().emit_events(false).build().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let res = ServiceBuilder::new()
            .emit_events(false)
            .max_retries(0)
            .build();
        assert!(matches!(res, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_land_in_config() {
        let service = ServiceBuilder::new()
            .max_retries(5)
            .base_delay(Duration::from_millis(50))
            .log_errors(false)
            .event_sink(Arc::new(RecordingEventSink::new()))
            .build()
            .unwrap();
        assert_eq!(service.config().max_retries, 5);
        assert_eq!(service.get_retry_delay(2), Duration::from_millis(100));
        assert!(!service.config().log_errors);
    }

    #[test]
    fn sub_millisecond_base_delay_rounds_up() {
        let service = ServiceBuilder::new()
            .emit_events(false)
            .base_delay(Duration::from_micros(300))
            .build()
            .unwrap();
        assert_eq!(service.config().base_delay_ms, 1);

        let service = ServiceBuilder::new()
            .emit_events(false)
            .base_delay(Duration::from_micros(1500))
            .build()
            .unwrap();
        assert_eq!(service.get_retry_delay(1), Duration::from_millis(2));
    }
}
