//! Core trait definitions for prompt backends and notification sinks.
//!
//! Backends are implemented by the `promptfixer-providers` crate; notifiers
//! are supplied by whatever front end drives a session.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::PromptRequest;

// ---------------------------------------------------------------------------
// Prompt backend trait
// ---------------------------------------------------------------------------

/// A service that scores, rewrites, and executes prompts.
#[async_trait]
pub trait PromptBackend: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Score a prompt. Returns the raw scoring feedback text.
    async fn score(&self, request: &PromptRequest) -> anyhow::Result<String>;

    /// Rewrite a prompt in the requested tone.
    async fn rewrite(&self, request: &PromptRequest) -> anyhow::Result<String>;

    /// Execute a prompt and return the AI output.
    async fn run(&self, request: &PromptRequest) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A short user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for status notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _: &Notification) {}
}

/// Emits notifications as tracing events.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: &Notification) {
        match n.kind {
            NotificationKind::Success => tracing::info!(title = %n.title, "{}", n.message),
            NotificationKind::Error => tracing::error!(title = %n.title, "{}", n.message),
        }
    }
}

/// Keeps every notification in memory, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&Notification::success("Success", "first"));
        notifier.notify(&Notification::error("second"));

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "first");
        assert_eq!(all[1].kind, NotificationKind::Error);
        assert_eq!(all[1].title, "Error");
        assert_eq!(notifier.last().unwrap().message, "second");
    }
}
