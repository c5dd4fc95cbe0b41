//! In-memory sinks that remember what they were given.

use parking_lot::Mutex;

use crate::domain::{ErrorEvent, Notice};
use crate::ports::{EventSink, Presenter};

#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ErrorEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ErrorEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: ErrorEvent) {
        self.events.lock().push(event);
    }
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}
