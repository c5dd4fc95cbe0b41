//! Notice - what the presentation layer is asked to show.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::code::ErrorCode;
use super::severity::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub code: ErrorCode,
    pub show_modal: bool,
    /// `None`: stays until the user dismisses it.
    #[serde(default, with = "opt_millis")]
    pub dismiss_after: Option<Duration>,
}

/// Per-call overrides of the severity-derived presentation defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub title: Option<String>,
    pub show_modal: Option<bool>,
    /// `Some(None)` forces a persistent notice.
    pub dismiss_after: Option<Option<Duration>>,
    pub severity: Option<Severity>,
}

impl ReportOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn show_modal(mut self, show: bool) -> Self {
        self.show_modal = Some(show);
        self
    }

    pub fn dismiss_after(mut self, delay: Option<Duration>) -> Self {
        self.dismiss_after = Some(delay);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

impl Notice {
    /// Build a notice from defaults, then apply overrides.
    pub fn build(
        message: impl Into<String>,
        code: ErrorCode,
        severity: Severity,
        options: &ReportOptions,
    ) -> Self {
        let severity = options.severity.unwrap_or(severity);
        Self {
            title: options
                .title
                .clone()
                .unwrap_or_else(|| severity.title().to_string()),
            message: message.into(),
            severity,
            code,
            show_modal: options.show_modal.unwrap_or_else(|| severity.shows_modal()),
            dismiss_after: options
                .dismiss_after
                .unwrap_or_else(|| severity.dismiss_after()),
        }
    }
}

mod opt_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_severity() {
        let n = Notice::build(
            "m",
            ErrorCode::ValidationError,
            Severity::Warning,
            &ReportOptions::default(),
        );
        assert_eq!(n.title, "Warning");
        assert!(!n.show_modal);
        assert_eq!(n.dismiss_after, Some(Duration::from_secs(5)));

        let n = Notice::build(
            "m",
            ErrorCode::PermissionDenied,
            Severity::Critical,
            &ReportOptions::default(),
        );
        assert!(n.show_modal);
        assert_eq!(n.dismiss_after, None);
    }

    #[test]
    fn overrides_apply() {
        let opts = ReportOptions::default()
            .title("Import failed")
            .show_modal(false)
            .dismiss_after(Some(Duration::from_secs(10)));
        let n = Notice::build("m", ErrorCode::NetworkError, Severity::Error, &opts);
        assert_eq!(n.title, "Import failed");
        assert!(!n.show_modal);
        assert_eq!(n.dismiss_after, Some(Duration::from_secs(10)));
    }

    #[test]
    fn dismiss_after_serializes_as_millis() {
        let n = Notice::build("m", ErrorCode::Cancelled, Severity::Info, &ReportOptions::default());
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["dismissAfter"], serde_json::json!(3000));
    }
}
