use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::ClientEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Error,
    Success,
}

/// A single user-facing status message.
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

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }
}

/// Holds at most one notification. Setting always replaces; nothing expires.
pub struct NotificationChannel {
    current: Mutex<Option<Notification>>,
    events: broadcast::Sender<ClientEvent>,
}

impl NotificationChannel {
    pub(crate) fn new(events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            current: Mutex::new(None),
            events,
        }
    }

    pub fn set(&self, notification: Notification) {
        self.replace(Some(notification));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, next: Option<Notification>) {
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = next.clone();
        }
        let _ = self.events.send(ClientEvent::NotificationChanged(next));
    }
}
