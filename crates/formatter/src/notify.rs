//! Transient status-line notifications
//!
//! Notifications are pushed into an unbounded channel and never awaited, so
//! sending one cannot hold up the command that produced it. Whoever owns the
//! [`StatusLine`] shows them whenever it gets around to it.

use tokio::sync::mpsc;

/// Message shown after a range has been formatted
pub const FORMATTED_MESSAGE: &str = "JsPrettier: JavaScript formatted.";

/// A single status-line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(pub String);

/// Create a connected notifier/status-line pair
pub fn status_channel() -> (StatusNotifier, StatusLine) {
    let (tx, rx) = mpsc::unbounded_channel();
    (StatusNotifier { tx }, StatusLine { rx })
}

/// Sending half, handed to commands
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    tx: mpsc::UnboundedSender<StatusMessage>,
}

impl StatusNotifier {
    /// Queue `message` for display; a closed status line drops it silently
    pub fn notify(&self, message: impl Into<String>) {
        if self.tx.send(StatusMessage(message.into())).is_err() {
            tracing::debug!("status line closed, dropping notification");
        }
    }
}

/// Receiving half, owned by the host
#[derive(Debug)]
pub struct StatusLine {
    rx: mpsc::UnboundedReceiver<StatusMessage>,
}

impl StatusLine {
    /// Wait for the next message; `None` once every notifier is gone
    pub async fn recv(&mut self) -> Option<StatusMessage> {
        self.rx.recv().await
    }

    /// Take every message that is already queued
    pub fn drain(&mut self) -> Vec<StatusMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }
}
