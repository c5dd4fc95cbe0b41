//! Decision model: whether a failed attempt gets another try.
//!
//! `should_retry` is the pure retry predicate. `Decision` is what a
//! `RetryDecider` hands back to the executor: retry after a delay, or stop.

use std::time::Duration;

use super::code::ErrorCode;
use super::raw::RawError;
use super::record::normalize;

/// Message markers that make an error network-like regardless of its code.
const NETWORK_MARKERS: &[&str] = &[
    "network",
    "Network",
    "timeout",
    "Timeout",
    "ECONNREFUSED",
    "ECONNRESET",
    "ENOTFOUND",
    "EAI_AGAIN",
    "getaddrinfo",
];

/// The next action after a failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Try again after `delay`.
    Retry { delay: Duration, reason: String },

    /// Stop; the executor reports `RETRY_EXHAUSTED`.
    GiveUp { reason: String },
}

impl Decision {
    pub fn is_retry(&self) -> bool {
        matches!(self, Decision::Retry { .. })
    }
}

/// Pure retry predicate.
///
/// Order of checks:
/// 1. no attempts left -> false
/// 2. not recoverable -> false
/// 3. network-like (code, message marker, or a `TypeError` about fetch) -> true
/// 4. `VALIDATION_ERROR` -> true
/// 5. status >= 500 -> true
/// 6. otherwise false
pub fn should_retry(error: &RawError, attempt: u32, max_retries: u32) -> bool {
    if attempt >= max_retries {
        return false;
    }

    let record = normalize(error);
    if !record.recoverable {
        return false;
    }

    if is_network_like(error, record.code, &record.message) {
        return true;
    }

    if record.code == ErrorCode::ValidationError {
        return true;
    }

    matches!(error.status(), Some(status) if status >= 500)
}

fn is_network_like(error: &RawError, code: ErrorCode, message: &str) -> bool {
    if code.is_network_like() {
        return true;
    }
    if NETWORK_MARKERS.iter().any(|m| message.contains(m)) {
        return true;
    }
    let lower = message.to_lowercase();
    if lower.contains("connection refused") || lower.contains("dns") {
        return true;
    }
    error.name() == Some("TypeError") && message.contains("fetch")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw::{Exception, StructuredError};
    use rstest::rstest;
    use serde_json::json;

    fn fetch_type_error() -> RawError {
        Exception::named("TypeError", "fetch failed").into()
    }

    #[test]
    fn fetch_type_error_retries_until_attempts_run_out() {
        assert!(should_retry(&fetch_type_error(), 1, 3));
        assert!(should_retry(&fetch_type_error(), 2, 3));
        assert!(!should_retry(&fetch_type_error(), 3, 3));
    }

    #[rstest]
    #[case(Exception::new("x").with_code(ErrorCode::PermissionDenied).into(), false)]
    #[case(Exception::new("x").with_code(ErrorCode::FileReadError).into(), false)]
    #[case(Exception::new("x").with_code(ErrorCode::TimeoutError).into(), true)]
    #[case(Exception::new("x").with_code(ErrorCode::ValidationError).into(), true)]
    #[case(Exception::new("x").with_code(ErrorCode::FileNotFound).into(), false)]
    #[case(Exception::new("x").with_code(ErrorCode::FileNotFound).with_status(502).into(), true)]
    #[case(RawError::exception("plain failure"), false)]
    fn predicate_table(#[case] error: RawError, #[case] expected: bool) {
        assert_eq!(should_retry(&error, 1, 3), expected);
    }

    #[test]
    fn structured_server_errors_are_retried() {
        let err = RawError::from(json!({"error": "Service Unavailable", "status": 503}));
        assert!(should_retry(&err, 1, 3));

        let err = RawError::from(json!({"error": "Bad Request", "status": 400}));
        assert!(!should_retry(&err, 1, 3));
    }

    #[test]
    fn explicit_unrecoverable_flag_wins() {
        let err = RawError::Structured(StructuredError {
            message: Some("network flapped".into()),
            code: Some("NETWORK_ERROR".into()),
            recoverable: Some(false),
            ..StructuredError::default()
        });
        assert!(!should_retry(&err, 1, 3));
    }

    #[test]
    fn plain_string_with_network_marker_is_retried() {
        assert!(should_retry(&"Network request failed".into(), 1, 3));
        assert!(!should_retry(&"title missing".into(), 1, 3));
    }
}
