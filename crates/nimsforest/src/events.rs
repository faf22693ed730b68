//! # Viewer Event Surface
//!
//! One-way notifications from the controller to whoever hosts it.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ Controller  │─────>│   Event     │─────>│    Host     │
//! │ (refresh,   │      │   Channel   │      │ (sidebar,   │
//! │  clicks)    │      └─────────────┘      │  status bar)│
//! └─────────────┘                           └─────────────┘
//! ```
//!
//! Uses crossbeam channels so the host can drain on its own cadence
//! without blocking the refresh path.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use nimsforest_model::Selection;

/// Notifications emitted by the controller.
#[derive(Clone, Debug)]
pub enum ViewerEvent {
    /// The selection changed: something was clicked, cleared, or invalidated
    /// by a snapshot replacement.
    SelectionChanged {
        /// New selection, `None` when cleared.
        selection: Option<Selection>,
    },

    /// A new snapshot was applied and the scene rebuilt.
    WorldReplaced {
        /// Lands in the new snapshot.
        land_count: usize,
        /// Workloads across all lands.
        workload_count: usize,
    },

    /// A refresh failed; the previous snapshot stays on screen.
    FetchFailed {
        /// Source that failed.
        source: String,
        /// Error description.
        reason: String,
    },
}

/// Event bus between the controller and its host.
///
/// Bounded so a host that stops draining cannot grow memory; overflow
/// drops events, which for UI notifications is acceptable.
pub struct EventBus {
    sender: Sender<ViewerEvent>,
    receiver: Receiver<ViewerEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// A sender handle. Clone per producer.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// A receiver handle. Clone per consumer.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for emitting viewer events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<ViewerEvent>,
}

impl EventSender {
    /// Sends without blocking. Returns `false` when the bus is full or the
    /// receiver is gone; the event is dropped either way.
    #[inline]
    pub fn send(&self, event: ViewerEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for consuming viewer events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<ViewerEvent>,
}

impl EventReceiver {
    /// Drains all pending events without blocking.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<ViewerEvent> {
        let mut events = Vec::with_capacity(16);
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event without blocking.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<ViewerEvent> {
        self.receiver.try_recv().ok()
    }

    /// Whether events are waiting.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
