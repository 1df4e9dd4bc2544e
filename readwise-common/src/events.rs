//! Client event bus
//!
//! Views report user-facing outcomes (toasts, redirects, feed growth) through a
//! broadcast channel. A host subscribes to render them; views never wait on it.

use crate::Route;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

/// Client event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Transient notification
    Toast { level: ToastLevel, message: String },

    /// A guard or completed flow asks the host to navigate
    Navigate { route: Route },

    /// Feed posts changed after a successful page fetch
    FeedUpdated {
        /// Page that was just applied
        page: u32,
        /// Post count after merging
        total_posts: usize,
        has_more: bool,
    },
}

impl ClientEvent {
    pub fn success(message: impl Into<String>) -> Self {
        ClientEvent::Toast {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ClientEvent::Toast {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Broadcast bus for [`ClientEvent`]s
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ClientEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use readwise_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(64);
    /// assert_eq!(event_bus.capacity(), 64);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ClientEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("No subscribers for client event");
        }
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
