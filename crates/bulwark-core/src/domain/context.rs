//! Diagnostic context attached to a failure.
//!
//! The service never interprets these keys beyond a couple of conventional
//! ones (`source`, `operation`, `userMessage`); everything else passes
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key/value map supplied by callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorContext(Map<String, Value>);

impl ErrorContext {
    pub const SOURCE: &'static str = "source";
    pub const OPERATION: &'static str = "operation";
    pub const STACK: &'static str = "stack";
    pub const USER_MESSAGE: &'static str = "userMessage";

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Shorthand for the usual `{source, operation}` pair.
    pub fn for_operation(source: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new()
            .with(Self::SOURCE, source.into())
            .with(Self::OPERATION, operation.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn source(&self) -> Option<&str> {
        self.get_str(Self::SOURCE)
    }

    /// Merge `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &ErrorContext) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ErrorContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Objects become the map itself; `null` becomes an empty context; any other
/// JSON value is kept under a `value` key.
impl From<Value> for ErrorContext {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::new(),
            other => Self::new().with("value", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_prefers_incoming_keys() {
        let mut base = ErrorContext::from(json!({"source": "a", "stack": "s"}));
        base.merge(&ErrorContext::from(json!({"source": "b"})));
        assert_eq!(base.source(), Some("b"));
        assert_eq!(base.get_str("stack"), Some("s"));
    }

    #[test]
    fn non_object_values_are_wrapped() {
        assert!(ErrorContext::from(Value::Null).is_empty());
        let ctx = ErrorContext::from(json!(42));
        assert_eq!(ctx.get("value"), Some(&json!(42)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let ctx = ErrorContext::for_operation("ProjectManager", "save");
        let v = serde_json::to_value(&ctx).unwrap();
        assert_eq!(v, json!({"source": "ProjectManager", "operation": "save"}));
    }
}
