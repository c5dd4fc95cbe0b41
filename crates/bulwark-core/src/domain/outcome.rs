//! Outcome model: the common result format for every executor.
//!
//! In memory an outcome is a two-variant enum. On the wire (event payloads,
//! CLI output) it keeps the flat `{success, data | error, code, ...}` shape
//! consumers already know.

use serde::{Deserialize, Serialize, Serializer};

use super::code::ErrorCode;
use super::context::ErrorContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_fallback: Option<bool>,
    /// `FALLBACK_USED` when the value came from a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_error: Option<String>,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            attempts: None,
            used_fallback: None,
            code: None,
            primary_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub error: String,
    pub code: ErrorCode,
    #[serde(default)]
    pub context: ErrorContext,
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome<T> {
    Success(Success<T>),
    Failure(Failure),
}

impl<T> OperationOutcome<T> {
    pub fn success(data: T) -> Self {
        OperationOutcome::Success(Success::new(data))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            OperationOutcome::Success(s) => Some(&s.data),
            OperationOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            OperationOutcome::Success(_) => None,
            OperationOutcome::Failure(f) => Some(f),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            OperationOutcome::Success(s) => s.code,
            OperationOutcome::Failure(f) => Some(f.code),
        }
    }

    pub fn attempts(&self) -> Option<u32> {
        match self {
            OperationOutcome::Success(s) => s.attempts,
            OperationOutcome::Failure(f) => f.attempts,
        }
    }

    pub fn used_fallback(&self) -> Option<bool> {
        match self {
            OperationOutcome::Success(s) => s.used_fallback,
            OperationOutcome::Failure(f) => f.used_fallback,
        }
    }

    pub fn primary_error(&self) -> Option<&str> {
        match self {
            OperationOutcome::Success(s) => s.primary_error.as_deref(),
            OperationOutcome::Failure(f) => f.primary_error.as_deref(),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            OperationOutcome::Success(s) => Ok(s.data),
            OperationOutcome::Failure(f) => Err(f),
        }
    }

    pub(crate) fn with_attempts(mut self, attempts: u32) -> Self {
        match &mut self {
            OperationOutcome::Success(s) => s.attempts = Some(attempts),
            OperationOutcome::Failure(f) => f.attempts = Some(attempts),
        }
        self
    }
}

#[derive(Serialize)]
struct Tagged<'a, B> {
    success: bool,
    #[serde(flatten)]
    body: &'a B,
}

impl<T: Serialize> Serialize for OperationOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OperationOutcome::Success(body) => Tagged { success: true, body }.serialize(serializer),
            OperationOutcome::Failure(body) => failure_outcome(body, serializer),
        }
    }
}

/// Writes a bare `Failure` in the same flat `{success: false, ...}` shape as
/// `OperationOutcome::Failure`. Used for event payloads.
pub(crate) fn failure_outcome<S: Serializer>(
    failure: &Failure,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Tagged {
        success: false,
        body: failure,
    }
    .serialize(serializer)
}
