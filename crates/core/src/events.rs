//! Session event broadcast
//!
//! Replaces the browser-era "write a flag other tabs poll" signal with an
//! explicit broadcast channel: teardown publishes one [`SessionEvent`] and
//! every subscribed context (UI shell, background sync, other windows)
//! reacts on its own, typically by notifying the user, navigating to the
//! login entry point and clearing its cached credentials.

use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Events published by the HTTP client about the session lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session is unrecoverable; credentials have been cleared
    Expired { reason: String },
}

/// Cloneable handle to the session event channel
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to session events. Each receiver sees every event
    /// published after the subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Succeeds whether or not anyone is listening.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
