//! Event Bus
//!
//! Synchronous, ordered fan-out of [`PageEvent`]s on the page's single
//! execution context.
//!
//! ```text
//! component callback → publish() ──┬─→ pending queue → Site delivers to components
//!                                  └─→ subscriber channels (outside observers)
//! ```

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};
use tracing::trace;

use super::PageEvent;

/// Page-local event bus
#[derive(Debug, Default)]
pub struct EventBus {
    /// Events awaiting delivery to the page components, oldest first
    pending: VecDeque<PageEvent>,
    /// External subscribers, in subscription order
    subscribers: Vec<Sender<PageEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to components and subscribers
    pub fn publish(&mut self, event: PageEvent) {
        trace!(kind = event.kind(), "Publishing page event");
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        self.pending.push_back(event);
    }

    /// Subscribe to every event published from now on
    pub fn subscribe(&mut self) -> Receiver<PageEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Next event awaiting component delivery
    pub fn next_pending(&mut self) -> Option<PageEvent> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
