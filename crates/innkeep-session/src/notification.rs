//! Single-slot user-facing notification.

use std::fmt;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn error(err: &dyn fmt::Display) -> Self {
        Self::new(err.to_string(), Severity::Error)
    }
}

/// Holds at most one pending notification; a new one replaces the old.
#[derive(Debug)]
pub(crate) struct NotificationSlot {
    tx: watch::Sender<Option<Notification>>,
}

impl NotificationSlot {
    pub(crate) fn new() -> Self {
        Self {
            tx: watch::Sender::new(None),
        }
    }

    pub(crate) fn set(&self, notification: Notification) {
        self.tx.send_replace(Some(notification));
    }

    pub(crate) fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub(crate) fn current(&self) -> Option<Notification> {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.tx.subscribe()
    }
}
