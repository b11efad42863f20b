//! User-visible notifications emitted by mutation commands.
//!
//! Delivery is fire-and-forget over an unbounded channel; the host (UI shell,
//! test harness, the board binary) owns the receiving end.

use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Notification::error(message));
    }

    fn send(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            // Receiver gone; nothing left to show notifications to.
            tracing::debug!("Notification dropped, no receiver");
        }
    }
}
