//! RawError - 正規化前のエラー値
//!
//! Callers fail in many shapes: a real error value with a name and stack, a
//! bare string, or an ad hoc `{error, code, context, recoverable}` object.
//! `RawError` is the tagged union of those shapes; `normalize` does the
//! exhaustive case analysis.

use std::error::Error as StdError;
use std::io;

use serde_json::Value;

use super::code::ErrorCode;
use super::context::ErrorContext;
use super::outcome::Failure;
use super::record::ErrorRecord;

/// Exception-like error: has a message and optionally a name, stack, an
/// explicit code and an HTTP-like status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exception {
    pub name: Option<String>,
    pub message: String,
    pub stack: Option<String>,
    /// Explicit code; overrides the keyword scan when it names a known code.
    pub code: Option<String>,
    pub status: Option<u16>,
}

impl Exception {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(message).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code.as_str().to_string());
        self
    }

    pub fn with_raw_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Plain structured object (`{error | message, code, context, recoverable}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredError {
    pub message: Option<String>,
    pub code: Option<String>,
    pub context: Option<ErrorContext>,
    pub recoverable: Option<bool>,
    pub status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawError {
    Exception(Exception),
    Message(String),
    Structured(StructuredError),
    /// Anything else: null, numbers, arrays, booleans.
    Opaque(Value),
}

impl RawError {
    pub fn exception(message: impl Into<String>) -> Self {
        RawError::Exception(Exception::new(message))
    }

    /// Wrap any `std::error::Error`; the source chain is kept as the stack.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut cur = err.source();
        while let Some(e) = cur {
            chain.push(format!("caused by: {e}"));
            cur = e.source();
        }
        let mut exc = Exception::new(err.to_string());
        if !chain.is_empty() {
            exc.stack = Some(chain.join("\n"));
        }
        RawError::Exception(exc)
    }

    /// Name of the underlying exception, when there is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            RawError::Exception(e) => e.name.as_deref(),
            _ => None,
        }
    }

    /// Best-effort message without normalizing.
    pub fn message(&self) -> Option<&str> {
        match self {
            RawError::Exception(e) => Some(&e.message),
            RawError::Message(m) => Some(m),
            RawError::Structured(s) => s.message.as_deref(),
            RawError::Opaque(_) => None,
        }
    }

    /// HTTP-like status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RawError::Exception(e) => e.status,
            RawError::Structured(s) => s.status,
            _ => None,
        }
    }
}

impl From<Exception> for RawError {
    fn from(e: Exception) -> Self {
        RawError::Exception(e)
    }
}

impl From<StructuredError> for RawError {
    fn from(s: StructuredError) -> Self {
        RawError::Structured(s)
    }
}

impl From<String> for RawError {
    fn from(s: String) -> Self {
        RawError::Message(s)
    }
}

impl From<&str> for RawError {
    fn from(s: &str) -> Self {
        RawError::Message(s.to_string())
    }
}

/// JSON values are duck-typed: strings are messages, objects are structured
/// errors, everything else is opaque.
impl From<Value> for RawError {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawError::Message(s),
            Value::Object(map) => {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .or_else(|| map.get("message").and_then(Value::as_str))
                    .map(str::to_string);
                let code = map.get("code").and_then(Value::as_str).map(str::to_string);
                let context = map.get("context").cloned().map(ErrorContext::from);
                let recoverable = map.get("recoverable").and_then(Value::as_bool);
                let status = map
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok());
                RawError::Structured(StructuredError {
                    message,
                    code,
                    context,
                    recoverable,
                    status,
                })
            }
            other => RawError::Opaque(other),
        }
    }
}

impl From<ErrorRecord> for RawError {
    fn from(record: ErrorRecord) -> Self {
        RawError::Structured(StructuredError {
            message: Some(record.message),
            code: Some(record.code.as_str().to_string()),
            context: Some(record.context),
            recoverable: Some(record.recoverable),
            status: None,
        })
    }
}

impl From<Failure> for RawError {
    fn from(failure: Failure) -> Self {
        RawError::Structured(StructuredError {
            message: Some(failure.error),
            code: Some(failure.code.as_str().to_string()),
            context: Some(failure.context),
            recoverable: Some(failure.recoverable),
            status: None,
        })
    }
}

impl From<io::Error> for RawError {
    fn from(err: io::Error) -> Self {
        let code = match err.kind() {
            io::ErrorKind::NotFound => Some(ErrorCode::FileNotFound),
            io::ErrorKind::PermissionDenied => Some(ErrorCode::PermissionDenied),
            io::ErrorKind::TimedOut => Some(ErrorCode::TimeoutError),
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected => Some(ErrorCode::NetworkError),
            _ => None,
        };
        let mut exc = Exception::named("IoError", err.to_string());
        if let Some(code) = code {
            exc = exc.with_code(code);
        }
        RawError::Exception(exc)
    }
}

impl From<serde_json::Error> for RawError {
    fn from(err: serde_json::Error) -> Self {
        RawError::Exception(
            Exception::named("SyntaxError", err.to_string()).with_code(ErrorCode::ValidationError),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_reads_error_before_message() {
        let raw = RawError::from(json!({"error": "e", "message": "m", "status": 503}));
        let RawError::Structured(s) = raw else {
            panic!("expected structured");
        };
        assert_eq!(s.message.as_deref(), Some("e"));
        assert_eq!(s.status, Some(503));
    }

    #[test]
    fn json_scalars_are_opaque() {
        assert!(matches!(RawError::from(json!(null)), RawError::Opaque(_)));
        assert!(matches!(RawError::from(json!(7)), RawError::Opaque(_)));
        assert!(matches!(RawError::from(json!([1, 2])), RawError::Opaque(_)));
        assert!(matches!(RawError::from(json!("x")), RawError::Message(_)));
    }

    #[test]
    fn io_errors_carry_explicit_codes() {
        let raw = RawError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let RawError::Exception(e) = raw else {
            panic!("expected exception");
        };
        assert_eq!(e.code.as_deref(), Some("FILE_NOT_FOUND"));
        assert_eq!(e.name.as_deref(), Some("IoError"));
    }

    #[test]
    fn from_error_keeps_source_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] io::Error);

        let err = Outer(io::Error::other("inner"));
        let raw = RawError::from_error(&err);
        let RawError::Exception(e) = raw else {
            panic!("expected exception");
        };
        assert_eq!(e.message, "outer");
        assert_eq!(e.stack.as_deref(), Some("caused by: inner"));
    }
}
