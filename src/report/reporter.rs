//! # Status reporter: serialized output with a strict cutoff.
//!
//! Every line goes through one output critical section. Inside it the reporter
//! checks the halt state of the table and drops the line if the run was halted.
//! The monitor raises the starvation flag and prints "died" inside the same
//! section, so nothing can be printed after a death line.
//!
//! ```text
//! report(id, status):        announce_death(id):
//!   lock(output)               lock(output)
//!   flags.is_halted()? ─► drop   flags.raise_starved()? ─► no: drop
//!   write "<ms> <id> <status>"   write "<ms> <id> died"
//!   unlock(output)             unlock(output)
//! ```
//!
//! Lock order is output → flags. The flag lock is a leaf and is never held while
//! waiting for the output lock.

use parking_lot::Mutex;
use tracing::warn;

use super::{
    sink::Sink,
    status::{Status, StatusLine},
};
use crate::{clock::Clock, table::Flags};

struct Output {
    sink: Box<dyn Sink>,
    failed: bool,
}

impl Output {
    fn write(&mut self, line: &StatusLine) {
        if let Err(e) = self.sink.write_line(line) {
            // One warning is enough: a closed stdout fails every time.
            if !self.failed {
                warn!(sink = self.sink.name(), error = %e, "status output failed");
                self.failed = true;
            }
        }
    }
}

/// Serializes status lines from every philosopher and the monitor.
pub struct Reporter {
    out: Mutex<Output>,
}

impl Reporter {
    /// Creates a reporter writing to `sink`.
    pub fn new(sink: impl Sink) -> Self {
        Self::boxed(Box::new(sink))
    }

    /// Creates a reporter from an already boxed sink.
    pub fn boxed(sink: Box<dyn Sink>) -> Self {
        Self {
            out: Mutex::new(Output {
                sink,
                failed: false,
            }),
        }
    }

    /// Prints `status` for `philosopher` unless the run has been halted.
    ///
    /// Returns `true` if the line was written.
    pub fn report(&self, flags: &Flags, clock: &Clock, philosopher: usize, status: Status) -> bool {
        let mut out = self.out.lock();
        if flags.is_halted() {
            return false;
        }
        let line = StatusLine {
            at_ms: clock.now_ms(),
            philosopher,
            status,
        };
        out.write(&line);
        true
    }

    /// Raises the starvation flag and prints the single "died" line.
    ///
    /// Returns the printed line, or `None` if the run was already over
    /// (another terminal condition won, or the table was interrupted).
    pub fn announce_death(
        &self,
        flags: &Flags,
        clock: &Clock,
        philosopher: usize,
    ) -> Option<StatusLine> {
        let mut out = self.out.lock();
        if !flags.raise_starved() {
            return None;
        }
        let line = StatusLine {
            at_ms: clock.now_ms(),
            philosopher,
            status: Status::Died,
        };
        out.write(&line);
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemorySink;

    #[tokio::test(start_paused = true)]
    async fn nothing_is_printed_after_death() {
        let sink = MemorySink::new();
        let reporter = Reporter::new(sink.clone());
        let flags = Flags::new();
        let clock = Clock::start();

        assert!(reporter.report(&flags, &clock, 2, Status::Eating));
        let died = reporter.announce_death(&flags, &clock, 1).unwrap();
        assert_eq!(died.status, Status::Died);

        assert!(!reporter.report(&flags, &clock, 2, Status::Sleeping));
        assert!(reporter.announce_death(&flags, &clock, 3).is_none());
        assert_eq!(sink.rendered(), vec!["0 2 is eating", "0 1 died"]);
    }

    #[tokio::test(start_paused = true)]
    async fn quota_does_not_silence_output() {
        let sink = MemorySink::new();
        let reporter = Reporter::new(sink.clone());
        let flags = Flags::new();
        let clock = Clock::start();

        assert!(flags.raise_quota_met());
        assert!(reporter.report(&flags, &clock, 1, Status::Sleeping));
        assert!(reporter.announce_death(&flags, &clock, 1).is_none());
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_silences_output() {
        let sink = MemorySink::new();
        let reporter = Reporter::new(sink.clone());
        let flags = Flags::new();
        let clock = Clock::start();

        flags.interrupt();
        assert!(!reporter.report(&flags, &clock, 1, Status::Thinking));
        assert!(reporter.announce_death(&flags, &clock, 1).is_none());
        assert!(sink.is_empty());
    }
}
