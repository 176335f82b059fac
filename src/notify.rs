//! Operation outcome notifications.
//!
//! The engine reports each operation's outcome to a [`NotificationSink`].
//! Delivery is fire-and-forget; a sink cannot fail or block an operation.

use log::{info, warn};
use std::fmt::Debug;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A user-facing outcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Receives operation outcomes.
pub trait NotificationSink: Debug {
    fn notify(&mut self, notification: &Notification);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notification: &Notification) {}
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, n: &Notification) {
        match n.severity {
            Severity::Info => info!("{}: {}", n.title, n.message),
            Severity::Error => warn!("{}: {}", n.title, n.message),
        }
    }
}

/// Keeps every notification in memory, oldest first.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notifications: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Empties the buffer, returning what it held.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn notify(&mut self, notification: &Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.notify(&Notification::info("Success", "done"));
        sink.notify(&Notification::error("Error", "nope"));
        assert_eq!(sink.notifications().len(), 2);
        assert!(sink.last().unwrap().is_error());

        let drained = sink.drain();
        assert_eq!(drained[0].title, "Success");
        assert!(sink.notifications().is_empty());
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink = Box::new(RecordingSink::new());
        NotificationSink::notify(&mut sink, &Notification::error("Error", "boxed"));
        assert_eq!(sink.notifications(), &[Notification::error("Error", "boxed")]);

        let mut dynamic: Box<dyn NotificationSink> = Box::new(NullSink);
        dynamic.notify(&Notification::info("Success", "dropped"));
    }
}
