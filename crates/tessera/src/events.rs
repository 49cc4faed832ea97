//! # Input Channel
//!
//! The windowing layer pushes normalized [`Event`]s from wherever it polls
//! the OS; the frame loop drains them once per tick without blocking.
//!
//! ```text
//! ┌─────────────┐  EventSender   ┌─────────────┐  EventReceiver  ┌─────────────┐
//! │  Windowing  │───────────────>│  bounded(N) │────────────────>│  App::tick  │
//! └─────────────┘                └─────────────┘                 └─────────────┘
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tessera_ui::Event;

/// Creates a connected sender/receiver pair holding at most `capacity`
/// pending events.
#[must_use]
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (sender, receiver) = bounded(capacity.max(1));
    (EventSender { sender }, EventReceiver { receiver })
}

/// Producer side. Cheap to clone.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<Event>,
}

impl EventSender {
    /// Queues an event without blocking.
    ///
    /// Returns false if the queue is full or the app is gone; the event is
    /// dropped in that case.
    #[inline]
    pub fn send(&self, event: Event) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!("input queue full, dropped {} event", event.kind().as_str());
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Queues an event, waiting for room.
    #[inline]
    pub fn send_blocking(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Consumer side, owned by the app.
#[derive(Debug)]
pub struct EventReceiver {
    receiver: Receiver<Event>,
}

impl EventReceiver {
    /// Takes every event queued so far.
    #[inline]
    pub fn drain(&self) -> Vec<Event> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Number of queued events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
