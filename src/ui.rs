//! Core → UI boundary.
//!
//! The core never touches rendering primitives. It emits [`UiEvent`]s to a
//! [`UiSink`] supplied by the host; the host turns them into DOM updates,
//! toasts, progress bars and so on.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::models::enums::{Collection, FormField, NotificationLevel};
use crate::selection::ListContents;
use crate::session::AnalysisReport;
use crate::wizard::Progress;

pub const SUBMIT_LABEL_IDLE: &str = "Analyze Patient";
pub const SUBMIT_LABEL_BUSY: &str = "Analyzing Patient Data...";

/// Payload emitted to the UI host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// Re-render one selection list.
    ListChanged {
        collection: Collection,
        contents: ListContents,
    },
    /// Wizard moved (or was reset).
    Progress(Progress),
    /// A field value computed by the core, e.g. BMI.
    FieldChanged { field: FormField, value: String },
    Notification {
        message: String,
        level: NotificationLevel,
        dismiss_after_ms: u64,
    },
    /// Enable/disable the submit button while an analysis is pending.
    SubmitAvailability { enabled: bool, label: String },
    /// Final results and clinical note.
    AnalysisReady(Box<AnalysisReport>),
}

impl UiEvent {
    pub fn notification(message: impl Into<String>, level: NotificationLevel, dismiss_after: Duration) -> Self {
        Self::Notification {
            message: message.into(),
            level,
            dismiss_after_ms: u64::try_from(dismiss_after.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn submit_available(enabled: bool) -> Self {
        Self::SubmitAvailability {
            enabled,
            label: if enabled { SUBMIT_LABEL_IDLE } else { SUBMIT_LABEL_BUSY }.to_string(),
        }
    }
}

/// Receives every event the core emits. Must not block.
pub trait UiSink: Send + Sync {
    fn emit(&self, event: UiEvent);
}

/// Forwards events over an unbounded tokio channel to the host's UI task.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UiSink for ChannelSink {
    fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("UI receiver dropped, event discarded");
        }
    }
}

/// Keeps every event in memory. Used by headless hosts and tests.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }

    /// Messages of every notification recorded so far.
    pub fn notifications(&self) -> Vec<(NotificationLevel, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Notification { message, level, .. } => Some((level, message)),
                _ => None,
            })
            .collect()
    }
}

impl UiSink for RecordingSink {
    fn emit(&self, event: UiEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
