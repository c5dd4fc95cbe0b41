//! ErrorRecord and normalization.

use serde::{Deserialize, Serialize};

use super::code::{ErrorCode, classify_message};
use super::context::ErrorContext;
use super::outcome::Failure;
use super::raw::{Exception, RawError, StructuredError};

pub const UNKNOWN_MESSAGE: &str = "Unknown error occurred";

/// Context key under which an unrecognized explicit code is preserved.
pub const RAW_CODE_KEY: &str = "rawCode";

/// Normalized representation of any failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default)]
    pub context: ErrorContext,
    pub recoverable: bool,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            context: ErrorContext::new(),
            recoverable: code.is_recoverable(),
        }
    }

    pub fn with_context(mut self, context: &ErrorContext) -> Self {
        self.context.merge(context);
        self
    }

    pub fn into_failure(self) -> Failure {
        Failure {
            error: self.message,
            code: self.code,
            context: self.context,
            recoverable: self.recoverable,
            attempts: None,
            used_fallback: None,
            primary_error: None,
        }
    }
}

/// Turn any raw error into exactly one `ErrorRecord`. Never fails.
pub fn normalize(raw: &RawError) -> ErrorRecord {
    match raw {
        RawError::Exception(exc) => normalize_exception(exc),
        RawError::Message(message) => ErrorRecord {
            message: message.clone(),
            code: ErrorCode::UnknownError,
            context: ErrorContext::new(),
            // strings are advisory/transient by policy
            recoverable: true,
        },
        RawError::Structured(s) => normalize_structured(s),
        RawError::Opaque(_) => ErrorRecord {
            message: UNKNOWN_MESSAGE.to_string(),
            code: ErrorCode::UnknownError,
            context: ErrorContext::new(),
            recoverable: false,
        },
    }
}

/// `normalize` followed by merging the caller's context on top.
pub fn normalize_with(raw: &RawError, context: &ErrorContext) -> ErrorRecord {
    normalize(raw).with_context(context)
}

fn normalize_exception(exc: &Exception) -> ErrorRecord {
    let mut context = ErrorContext::new();
    if let Some(stack) = &exc.stack {
        context.insert(ErrorContext::STACK, stack.clone());
    }

    let scanned = classify_message(&exc.message);
    let code = match exc.code.as_deref() {
        Some(explicit) => match explicit.parse::<ErrorCode>() {
            Ok(code) => code,
            Err(_) => {
                context.insert(RAW_CODE_KEY, explicit);
                scanned
            }
        },
        None => scanned,
    };

    ErrorRecord {
        message: exc.message.clone(),
        code,
        context,
        recoverable: code.is_recoverable(),
    }
}

fn normalize_structured(s: &StructuredError) -> ErrorRecord {
    let mut context = s.context.clone().unwrap_or_default();
    let code = match s.code.as_deref() {
        Some(explicit) => explicit.parse::<ErrorCode>().unwrap_or_else(|_| {
            context.insert(RAW_CODE_KEY, explicit);
            ErrorCode::UnknownError
        }),
        None => ErrorCode::UnknownError,
    };

    ErrorRecord {
        message: s
            .message
            .clone()
            .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        code,
        context,
        recoverable: s.recoverable != Some(false),
    }
}
