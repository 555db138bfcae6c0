//! # Lifecycle event bus.
//!
//! Philosophers, the monitor and the supervisor all publish into one broadcast
//! channel. The supervisor keeps a single receiver and hands each event to the
//! [`SubscriberSet`](crate::SubscriberSet).
//!
//! Publishing is synchronous, so a philosopher can report from any point of its
//! cycle without an extra await. A receiver that falls more than `capacity` events
//! behind loses the oldest ones. Events published while nobody listens are gone.

use tokio::sync::broadcast;

use super::event::Event;

/// Sending half of the event channel. Clones share the channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Opens a channel holding up to `capacity` undelivered events (at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, ev: Event) {
        // No receiver yet (or any more) is not an error.
        let _ = self.tx.send(ev);
    }

    /// Receiver for every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn late_receivers_miss_earlier_events() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::SimulationStarted));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::QuotaReached));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::QuotaReached);
    }
}
