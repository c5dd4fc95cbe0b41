//! Presenter that renders notices as log lines.

use tracing::{error, info, warn};

use crate::domain::{Notice, Severity};
use crate::ports::Presenter;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&self, notice: &Notice) {
        let dismiss_ms = notice.dismiss_after.map(|d| d.as_millis() as u64);
        match notice.severity {
            Severity::Info => info!(
                title = %notice.title,
                code = %notice.code,
                modal = notice.show_modal,
                dismiss_ms,
                "{}",
                notice.message
            ),
            Severity::Warning => warn!(
                title = %notice.title,
                code = %notice.code,
                modal = notice.show_modal,
                dismiss_ms,
                "{}",
                notice.message
            ),
            Severity::Error | Severity::Critical => error!(
                title = %notice.title,
                code = %notice.code,
                severity = ?notice.severity,
                modal = notice.show_modal,
                "{}",
                notice.message
            ),
        }
    }
}
