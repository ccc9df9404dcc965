//! Notifier boundary: transient status messages surfaced to the viewer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: NoticeSeverity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: NoticeSeverity::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: NoticeSeverity::Error,
        }
    }
}

/// Surface for transient status messages. The presentation layer (toasts in
/// the reference application) lives outside this crate.
pub trait Notifier: Send {
    fn notify(&mut self, notice: Notice);
}

/// Discards every notice.
#[derive(Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notice: Notice) {}
}

/// Forwards notices to the `log` facade; used by the CLI runner.
#[derive(Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            NoticeSeverity::Info => log::info!("{}: {}", notice.title, notice.description),
            NoticeSeverity::Error => log::warn!("{}: {}", notice.title, notice.description),
        }
    }
}

/// Keeps every notice behind a shared handle for later inspection; handy in
/// tests where the session owns the notifier.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: std::sync::Arc<std::sync::Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn handle(&self) -> std::sync::Arc<std::sync::Mutex<Vec<Notice>>> {
        self.notices.clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.lock().expect("notice log poisoned").push(notice);
    }
}
