//! ErrorCode - 失敗の分類（閉じた taxonomy）
//!
//! Every normalized failure carries exactly one of these codes. The
//! recoverability table lives here too so that classification and the retry
//! predicate read the same source of truth.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed error-code taxonomy.
///
/// Serialized as SCREAMING_SNAKE_CASE (`"NETWORK_ERROR"`, ...) so that
/// payloads published on the event bus keep the names consumers expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NetworkError,
    StorageQuotaExceeded,
    ValidationError,
    FileNotFound,
    PermissionDenied,
    FileReadError,
    FileWriteError,
    TimeoutError,
    RetryExhausted,
    FallbackUsed,
    /// Produced only when a retry run is cancelled through a `CancelSignal`.
    Cancelled,
    #[default]
    UnknownError,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::NetworkError,
        ErrorCode::StorageQuotaExceeded,
        ErrorCode::ValidationError,
        ErrorCode::FileNotFound,
        ErrorCode::PermissionDenied,
        ErrorCode::FileReadError,
        ErrorCode::FileWriteError,
        ErrorCode::TimeoutError,
        ErrorCode::RetryExhausted,
        ErrorCode::FallbackUsed,
        ErrorCode::Cancelled,
        ErrorCode::UnknownError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::StorageQuotaExceeded => "STORAGE_QUOTA_EXCEEDED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::FileReadError => "FILE_READ_ERROR",
            ErrorCode::FileWriteError => "FILE_WRITE_ERROR",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::RetryExhausted => "RETRY_EXHAUSTED",
            ErrorCode::FallbackUsed => "FALLBACK_USED",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Fixed recoverability table.
    ///
    /// Only input objects that carry their own `recoverable` field may
    /// disagree with this.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkError
                | ErrorCode::ValidationError
                | ErrorCode::StorageQuotaExceeded
                | ErrorCode::TimeoutError
                | ErrorCode::FileNotFound
        )
    }

    /// Network-like codes are the ones the retry predicate always retries.
    pub fn is_network_like(&self) -> bool {
        matches!(self, ErrorCode::NetworkError | ErrorCode::TimeoutError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code '{0}'")]
pub struct UnknownCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// Keyword groups scanned (case-sensitive) against an exception message.
///
/// Order matters: the first group with a hit decides the code.
const KEYWORD_GROUPS: &[(ErrorCode, &[&str])] = &[
    (
        ErrorCode::StorageQuotaExceeded,
        &["QuotaExceeded", "quota", "Quota", "storage full"],
    ),
    (
        ErrorCode::TimeoutError,
        &["timeout", "Timeout", "timed out", "ETIMEDOUT"],
    ),
    (
        ErrorCode::NetworkError,
        &[
            "network",
            "Network",
            "fetch",
            "ECONNREFUSED",
            "ECONNRESET",
            "ENOTFOUND",
            "connection refused",
            "Connection refused",
        ],
    ),
    (
        ErrorCode::PermissionDenied,
        &["permission", "Permission", "EACCES", "EPERM", "NotAllowedError"],
    ),
    (
        ErrorCode::FileNotFound,
        &["not found", "Not found", "ENOENT", "NotFoundError"],
    ),
    (
        ErrorCode::FileReadError,
        &["read error", "failed to read", "Failed to read", "NotReadableError"],
    ),
    (
        ErrorCode::FileWriteError,
        &["write error", "failed to write", "Failed to write", "EROFS"],
    ),
];

/// Classify a message by keyword scan. No hit yields `UNKNOWN_ERROR`.
pub fn classify_message(message: &str) -> ErrorCode {
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
        .map(|(code, _)| *code)
        .unwrap_or_default()
}
