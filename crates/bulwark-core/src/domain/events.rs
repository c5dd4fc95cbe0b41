//! Events - エラー通知イベント
//!
//! One event per handled failure, published on the shared event bus under a
//! single well-known topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::outcome::{Failure, failure_outcome};

/// Topic every error notification is published under.
pub const ERROR_OCCURRED: &str = "error:occurred";

/// Source used when the caller's context does not name one.
pub const DEFAULT_SOURCE: &str = "ErrorHandler";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub id: EventId,
    pub topic: String,
    pub source: String,
    /// Serialized as a failed outcome: `{success: false, error, code, ...}`.
    #[serde(serialize_with = "failure_outcome")]
    pub data: Failure,
    pub occurred_at: DateTime<Utc>,
}

impl ErrorEvent {
    pub fn new(id: EventId, data: Failure, occurred_at: DateTime<Utc>) -> Self {
        let source = data
            .context
            .source()
            .unwrap_or(DEFAULT_SOURCE)
            .to_string();
        Self {
            id,
            topic: ERROR_OCCURRED.to_string(),
            source,
            data,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ErrorContext, ErrorRecord, OperationOutcome};
    use chrono::TimeZone;
    use serde_json::json;
    use ulid::Ulid;

    #[test]
    fn source_comes_from_context_or_defaults() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let failure = ErrorRecord::new("x", ErrorCode::NetworkError)
            .with_context(&ErrorContext::for_operation("FileManager", "import"))
            .into_failure();
        let ev = ErrorEvent::new(EventId::from(Ulid::nil()), failure, at);
        assert_eq!(ev.topic, ERROR_OCCURRED);
        assert_eq!(ev.source, "FileManager");

        let failure = ErrorRecord::new("x", ErrorCode::NetworkError).into_failure();
        let ev = ErrorEvent::new(EventId::from(Ulid::nil()), failure, at);
        assert_eq!(ev.source, DEFAULT_SOURCE);
    }

    #[test]
    fn payload_has_failed_outcome_shape() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let failure = ErrorRecord::new("offline", ErrorCode::NetworkError).into_failure();
        let ev = ErrorEvent::new(EventId::from(Ulid::nil()), failure.clone(), at);

        let v = serde_json::to_value(&ev).unwrap();
        assert_eq!(v["topic"], json!(ERROR_OCCURRED));
        assert_eq!(v["data"]["success"], json!(false));
        assert_eq!(v["data"]["error"], json!("offline"));
        assert_eq!(v["data"]["code"], json!("NETWORK_ERROR"));
        assert_eq!(
            v["data"],
            serde_json::to_value(OperationOutcome::<()>::Failure(failure)).unwrap()
        );

        let back: ErrorEvent = serde_json::from_value(v).unwrap();
        assert_eq!(back, ev);
    }
}
