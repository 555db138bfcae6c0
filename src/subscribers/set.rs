//! # Per-subscriber queues and workers.
//!
//! [`SubscriberSet::emit`] never waits. It copies the event into one bounded queue
//! per subscriber, and a worker task per subscriber calls `on_event` in queue order.
//!
//! ```text
//! emit(ev) ─┬─ try_send ─► queue "log"    ─► worker ─► LogWriter::on_event
//!           └─ try_send ─► queue "custom" ─► worker ─► Custom::on_event
//!                 │                                        │
//!          full / closed                                 panic
//!                 ▼                                        ▼
//!        SubscriberOverflow                       SubscriberPanicked   (both on the Bus)
//! ```
//!
//! A panic inside `on_event` is caught with `catch_unwind` and the worker moves on
//! to the next event. State the subscriber guards with its own locks may be left
//! half-updated by such a panic.

use std::{any::Any, sync::Arc};

use futures::FutureExt;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

struct Queue {
    name: &'static str,
    tx: mpsc::Sender<Arc<Event>>,
}

/// Delivers each event to every subscriber without blocking the caller.
pub struct SubscriberSet {
    queues: Vec<Queue>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber. Needs a running tokio runtime.
    ///
    /// Delivery problems are published on `bus`.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let (queues, workers) = subs
            .into_iter()
            .map(|sub| {
                let (tx, rx) = mpsc::channel(sub.queue_capacity().max(1));
                let queue = Queue {
                    name: sub.name(),
                    tx,
                };
                (queue, tokio::spawn(work(sub, rx, bus.clone())))
            })
            .unzip();
        Self {
            queues,
            workers,
            bus,
        }
    }

    /// Queues `event` for every subscriber.
    ///
    /// A subscriber that cannot take it is reported with a `SubscriberOverflow`
    /// event, unless `event` is itself a delivery report.
    pub fn emit(&self, event: &Event) {
        let event = Arc::new(event.clone());
        for queue in &self.queues {
            let reason = match queue.tx.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(TrySendError::Full(_)) => "full",
                Err(TrySendError::Closed(_)) => "closed",
            };
            if !event.is_internal() {
                self.bus.publish(Event::subscriber_overflow(queue.name, reason));
            }
        }
    }

    /// Closes every queue and waits until the workers have handled what was queued.
    pub async fn shutdown(self) {
        drop(self.queues);
        for worker in self.workers {
            let _ = worker.await;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queues.len()
    }
}

async fn work(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Arc<Event>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let handled = std::panic::AssertUnwindSafe(sub.on_event(&ev))
            .catch_unwind()
            .await;
        if let Err(payload) = handled {
            bus.publish(Event::subscriber_panicked(sub.name(), panic_message(&*payload)));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<EventKind>>);

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, ev: &Event) {
            self.0.lock().push(ev.kind);
        }
        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Boom;

    #[async_trait]
    impl Subscribe for Boom {
        async fn on_event(&self, _ev: &Event) {
            panic!("boom");
        }
        fn name(&self) -> &'static str {
            "boom"
        }
    }

    #[tokio::test]
    async fn delivers_in_order_and_drains_on_shutdown() {
        let bus = Bus::new(16);
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![collect.clone() as Arc<dyn Subscribe>], bus);
        assert_eq!(set.len(), 1);

        set.emit(&Event::new(EventKind::SimulationStarted));
        set.emit(&Event::new(EventKind::QuotaReached));
        set.shutdown().await;

        assert_eq!(
            *collect.0.lock(),
            vec![EventKind::SimulationStarted, EventKind::QuotaReached]
        );
    }

    #[tokio::test]
    async fn panics_are_reported_on_the_bus() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = SubscriberSet::new(vec![Arc::new(Boom) as Arc<dyn Subscribe>], bus);

        set.emit(&Event::new(EventKind::AllStopped));
        set.shutdown().await;

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.subscriber, Some("boom"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
