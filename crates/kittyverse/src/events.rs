//! # Kittyverse Event Bus
//!
//! ```text
//!                              ┌──── bounded ────>  Indexer
//! ┌──────────────┐   fan-out   │
//! │ KittyEngine  │─────────────┼──── bounded ────>  UI
//! │  (commits)   │             │
//! └──────────────┘             └──── bounded ────>  Stats
//! ```
//!
//! Events are published after the commit they describe, never before.
//! Every subscriber owns a bounded queue and sees every event published
//! after it subscribed. A full queue drops the event for that subscriber
//! only; a dropped receiver is unregistered on the next publish. With no
//! subscribers nothing is buffered.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use kittyverse_shared::KittyEvent;
use parking_lot::Mutex;
use std::sync::Arc;

type Subscribers = Arc<Mutex<Vec<Sender<KittyEvent>>>>;

/// Fan-out bus between the engine and its consumers.
pub struct EventBus {
    capacity: usize,
    subscribers: Subscribers,
}

impl EventBus {
    /// Creates a bus whose subscribers each hold at most `capacity`
    /// undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            subscribers: Arc::default(),
        }
    }

    /// A producer handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Registers a new consumer with its own queue.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.lock().push(sender);
        EventReceiver { receiver }
    }

    /// Number of registered consumers, including any dropped since the
    /// last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// Handle for publishing events.
#[derive(Clone)]
pub struct EventSender {
    subscribers: Subscribers,
}

impl EventSender {
    /// Delivers to every subscriber without blocking. Returns `false` if
    /// any subscriber's queue was full and missed the event.
    pub fn send(&self, event: KittyEvent) -> bool {
        let mut delivered = true;
        self.subscribers
            .lock()
            .retain(|subscriber| match subscriber.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(kind = ?event.event_type(), "subscriber queue full, event dropped");
                    delivered = false;
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
        delivered
    }
}

/// One subscriber's queue.
pub struct EventReceiver {
    receiver: Receiver<KittyEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<KittyEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<KittyEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
