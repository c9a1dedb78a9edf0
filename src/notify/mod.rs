//! User-facing notifications.
//!
//! The client core never renders anything; it hands [`Notification`]s to a
//! [`Notifier`] supplied by the embedding UI.

mod watcher;

use serde::Serialize;
use tokio::sync::mpsc;

pub use watcher::FailureWatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }
}

/// Sink for notifications. Must not block.
pub trait Notifier: Send + Sync {
    fn push(&self, notification: Notification);
}

/// Forwards notifications over an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn push(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification dropped: receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&Notification::error("Loading failed")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"Loading failed"}"#);
    }

    #[test]
    fn channel_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        notifier.push(Notification::success("Selected"));
        notifier.push(Notification::error("Failed"));
        assert_eq!(rx.try_recv().unwrap(), Notification::success("Selected"));
        assert_eq!(rx.try_recv().unwrap(), Notification::error("Failed"));
    }
}
