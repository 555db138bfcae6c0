//! # Lifecycle events of one simulation run.
//!
//! Events are diagnostics for logging and custom subscribers. Status lines on
//! stdout never go through here; the [`Reporter`](crate::report::Reporter) writes
//! them directly.
//!
//! Every event carries a process-wide `seq` taken from one atomic counter, so two
//! events can always be ordered even when they arrive through different queues.
//!
//! ## Example
//! ```rust
//! use symposium::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::StarvationDetected)
//!     .with_philosopher(3)
//!     .with_at_ms(810)
//!     .with_meals(4);
//!
//! assert_eq!(ev.kind, EventKind::StarvationDetected);
//! assert_eq!(ev.philosopher, Some(3));
//! assert_eq!(ev.at_ms, Some(810));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// What happened. The payload fields an event fills in are listed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The table is set; `count` is the number of seats.
    SimulationStarted,
    /// A death was announced; `philosopher`, `at_ms`, `meals`.
    StarvationDetected,
    /// Everybody ate `must_eat` times; `at_ms`.
    QuotaReached,
    /// A signal or an [`Interrupter`](crate::Interrupter) asked the run to stop.
    ShutdownRequested,
    /// The last philosopher task returned; `at_ms`.
    AllStopped,
    /// Tasks outlived the grace period and were aborted; `count`.
    GraceExceeded,

    /// A seat's task began; `philosopher`.
    PhilosopherStarted,
    /// A seat's task returned; `philosopher`, `meals`, `at_ms`.
    PhilosopherStopped,

    /// A subscriber's queue refused an event; `subscriber`, `reason` (`full` or `closed`).
    SubscriberOverflow,
    /// A subscriber panicked in `on_event`; `subscriber`, `reason` (panic message).
    SubscriberPanicked,
}

/// One lifecycle event. Unused payload fields stay `None`.
#[derive(Clone, Debug)]
pub struct Event {
    /// Process-wide ordering key.
    pub seq: u64,
    /// Wall-clock time of creation, for logs.
    pub at: SystemTime,
    pub kind: EventKind,

    pub philosopher: Option<usize>,
    /// Simulation time in milliseconds.
    pub at_ms: Option<u64>,
    pub meals: Option<u32>,
    /// Seats at start, or tasks aborted after the grace period.
    pub count: Option<usize>,
    /// Name of the subscriber a delivery problem concerns.
    pub subscriber: Option<&'static str>,
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Stamps a new event of `kind` with the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: NEXT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            philosopher: None,
            at_ms: None,
            meals: None,
            count: None,
            subscriber: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_philosopher(mut self, id: usize) -> Self {
        self.philosopher = Some(id);
        self
    }

    #[inline]
    pub fn with_at_ms(mut self, ms: u64) -> Self {
        self.at_ms = Some(ms);
        self
    }

    #[inline]
    pub fn with_meals(mut self, meals: u32) -> Self {
        self.meals = Some(meals);
        self
    }

    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// `subscriber` could not take an event.
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Self::delivery(EventKind::SubscriberOverflow, subscriber, reason.into())
    }

    /// `subscriber` panicked with `message`.
    pub fn subscriber_panicked(subscriber: &'static str, message: String) -> Self {
        Self::delivery(EventKind::SubscriberPanicked, subscriber, message.into())
    }

    fn delivery(kind: EventKind, subscriber: &'static str, reason: Arc<str>) -> Self {
        let mut ev = Self::new(kind);
        ev.subscriber = Some(subscriber);
        ev.reason = Some(reason);
        ev
    }

    /// Raised by the subscriber fan-out about itself. Never re-reported on overflow.
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.subscriber.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::SimulationStarted);
        let b = Event::new(EventKind::AllStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delivery_problems_name_the_subscriber() {
        let ev = Event::subscriber_overflow("log", "full");
        assert!(ev.is_internal());
        assert_eq!(ev.kind, EventKind::SubscriberOverflow);
        assert_eq!(ev.subscriber, Some("log"));
        assert_eq!(ev.reason.as_deref(), Some("full"));

        let ev = Event::subscriber_panicked("metrics", "index out of bounds".to_string());
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.reason.as_deref(), Some("index out of bounds"));

        assert!(!Event::new(EventKind::QuotaReached).is_internal());
    }
}
