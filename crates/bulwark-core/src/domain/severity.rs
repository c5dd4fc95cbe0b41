//! Severity and user-facing messages.
//!
//! Pure lookup tables consumed by the presentation layer: which severity a
//! code gets, what friendly text the user sees, and how a notice of that
//! severity is shown by default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::code::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Default notice title.
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Info => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Critical => "Critical Error",
        }
    }

    /// ERROR and CRITICAL are presented modally by default.
    pub fn shows_modal(&self) -> bool {
        matches!(self, Severity::Error | Severity::Critical)
    }

    /// Auto-dismiss delay. `None` means the notice stays until dismissed.
    pub fn dismiss_after(&self) -> Option<Duration> {
        match self {
            Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error | Severity::Critical => None,
        }
    }
}

/// Used when nothing more specific applies.
pub const GENERIC_USER_MESSAGE: &str = "An unexpected error occurred. Please try again.";

impl ErrorCode {
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::StorageQuotaExceeded | ErrorCode::PermissionDenied => Severity::Critical,
            ErrorCode::FileReadError
            | ErrorCode::FileWriteError
            | ErrorCode::NetworkError
            | ErrorCode::RetryExhausted => Severity::Error,
            ErrorCode::ValidationError | ErrorCode::FileNotFound => Severity::Warning,
            ErrorCode::Cancelled => Severity::Info,
            ErrorCode::TimeoutError | ErrorCode::FallbackUsed | ErrorCode::UnknownError => {
                Severity::Error
            }
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCode::NetworkError => {
                "Network connection failed. Please check your connection and try again."
            }
            ErrorCode::StorageQuotaExceeded => {
                "Storage is full. Please free up space by deleting old projects or exporting them."
            }
            ErrorCode::ValidationError => {
                "Some of the data is invalid. Please check it and try again."
            }
            ErrorCode::FileNotFound => "The requested file could not be found.",
            ErrorCode::PermissionDenied => "Permission denied. Please check your access rights.",
            ErrorCode::FileReadError => {
                "The file could not be read. It may be corrupted or in an unsupported format."
            }
            ErrorCode::FileWriteError => "The file could not be saved. Please try again.",
            ErrorCode::TimeoutError => "The operation took too long. Please try again.",
            ErrorCode::RetryExhausted => {
                "The operation failed after several attempts. Please try again later."
            }
            ErrorCode::FallbackUsed => {
                "The operation completed using an alternative method. Some features may be limited."
            }
            ErrorCode::Cancelled => "The operation was cancelled.",
            ErrorCode::UnknownError => GENERIC_USER_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::StorageQuotaExceeded, Severity::Critical)]
    #[case(ErrorCode::PermissionDenied, Severity::Critical)]
    #[case(ErrorCode::FileReadError, Severity::Error)]
    #[case(ErrorCode::FileWriteError, Severity::Error)]
    #[case(ErrorCode::NetworkError, Severity::Error)]
    #[case(ErrorCode::RetryExhausted, Severity::Error)]
    #[case(ErrorCode::ValidationError, Severity::Warning)]
    #[case(ErrorCode::FileNotFound, Severity::Warning)]
    #[case(ErrorCode::UnknownError, Severity::Error)]
    #[case(ErrorCode::TimeoutError, Severity::Error)]
    #[case(ErrorCode::FallbackUsed, Severity::Error)]
    #[case(ErrorCode::Cancelled, Severity::Info)]
    fn severity_table(#[case] code: ErrorCode, #[case] expected: Severity) {
        assert_eq!(code.severity(), expected);
    }

    #[test]
    fn every_code_has_a_message() {
        for code in ErrorCode::ALL {
            assert!(!code.user_message().is_empty(), "{code} has no message");
        }
    }

    #[test]
    fn presentation_defaults() {
        assert_eq!(Severity::Info.dismiss_after(), Some(Duration::from_secs(3)));
        assert_eq!(Severity::Warning.dismiss_after(), Some(Duration::from_secs(5)));
        assert_eq!(Severity::Error.dismiss_after(), None);
        assert_eq!(Severity::Critical.dismiss_after(), None);
        assert!(Severity::Critical.shows_modal());
        assert!(!Severity::Warning.shows_modal());
    }
}
