//! # LogWriter: lifecycle events as `tracing` records
//!
//! A subscriber that turns incoming [`Event`]s into structured `tracing` events.
//! Where they end up (stderr, JSON, nowhere) is decided by the installed
//! `tracing` subscriber; the binary writes them to stderr so they never mix with
//! the status lines on stdout.
//!
//! ## Example output (fmt layer)
//! ```text
//! INFO symposium: simulation started philosophers=5
//! DEBUG symposium: philosopher stopped philosopher=3 meals=7 at_ms=2806
//! WARN symposium: starvation detected philosopher=2 at_ms=310 meals=1
//! INFO symposium: all tasks stopped at_ms=311
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::SimulationStarted => {
                info!(target: "symposium", philosophers = e.count, "simulation started");
            }
            EventKind::PhilosopherStarted => {
                debug!(target: "symposium", philosopher = e.philosopher, "philosopher started");
            }
            EventKind::PhilosopherStopped => {
                debug!(
                    target: "symposium",
                    philosopher = e.philosopher,
                    meals = e.meals,
                    at_ms = e.at_ms,
                    "philosopher stopped"
                );
            }
            EventKind::StarvationDetected => {
                warn!(
                    target: "symposium",
                    philosopher = e.philosopher,
                    at_ms = e.at_ms,
                    meals = e.meals,
                    "starvation detected"
                );
            }
            EventKind::QuotaReached => {
                info!(target: "symposium", at_ms = e.at_ms, "every philosopher reached the quota");
            }
            EventKind::ShutdownRequested => {
                info!(target: "symposium", "shutdown requested");
            }
            EventKind::AllStopped => {
                info!(target: "symposium", at_ms = e.at_ms, "all tasks stopped");
            }
            EventKind::GraceExceeded => {
                error!(target: "symposium", aborted = e.count, "grace period exceeded");
            }
            EventKind::SubscriberOverflow => {
                warn!(
                    target: "symposium",
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    reason = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber dropped an event"
                );
            }
            EventKind::SubscriberPanicked => {
                error!(
                    target: "symposium",
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
