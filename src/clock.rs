//! # Monotonic simulation clock.
//!
//! [`Clock`] measures milliseconds since the simulation started. It is built on
//! [`tokio::time::Instant`], so a paused test runtime drives it deterministically.

use std::time::Duration;

use tokio::time::Instant;

/// Monotonic millisecond time source anchored at the simulation start.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    /// Starts a clock at the current instant.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the start, saturating at `u64::MAX`.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Elapsed time since the start.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
