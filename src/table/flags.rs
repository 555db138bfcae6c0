//! # Termination flags.
//!
//! Two monotonic flags end a simulation: `starved` and `quota_met`. Both are raised
//! only by the monitor, at most once, and at most one of them ever becomes true.
//! A third, external condition (`interrupted`) comes from OS signals or an
//! [`Interrupter`](crate::Interrupter).
//!
//! ## Rules
//! - Each read or write is one short critical section on the flag lock.
//! - The lock is never held across an await point.
//! - Raising `starved` or interrupting also cancels the halt token, which wakes every
//!   cancellable wait (fork acquisition, eating, sleeping, monitor poll).
//! - `quota_met` does **not** cancel the halt token: a hold in progress completes.

use parking_lot::Mutex;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

#[derive(Debug, Default, Clone, Copy)]
struct FlagState {
    starved: bool,
    quota_met: bool,
    interrupted: bool,
}

/// Process-wide termination flags of one table.
#[derive(Debug, Default)]
pub struct Flags {
    state: Mutex<FlagState>,
    halt: CancellationToken,
}

impl Flags {
    /// Creates lowered flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a starvation was announced.
    pub fn is_starved(&self) -> bool {
        self.state.lock().starved
    }

    /// True once the table was interrupted from outside.
    pub fn is_interrupted(&self) -> bool {
        self.state.lock().interrupted
    }

    /// True if no new cycle may start (any terminal condition or interrupt).
    pub fn is_over(&self) -> bool {
        let s = self.state.lock();
        s.starved || s.quota_met || s.interrupted
    }

    /// True if in-flight work must stop and output is closed (starvation or interrupt).
    pub fn is_halted(&self) -> bool {
        let s = self.state.lock();
        s.starved || s.interrupted
    }

    /// Raises `starved`.
    ///
    /// Returns `false` without changing anything if the run is already over.
    pub fn raise_starved(&self) -> bool {
        {
            let mut s = self.state.lock();
            if s.starved || s.quota_met || s.interrupted {
                return false;
            }
            s.starved = true;
        }
        self.halt.cancel();
        true
    }

    /// Raises `quota_met`.
    ///
    /// Returns `false` without changing anything if the run is already over.
    pub fn raise_quota_met(&self) -> bool {
        let mut s = self.state.lock();
        if s.starved || s.quota_met || s.interrupted {
            return false;
        }
        s.quota_met = true;
        true
    }

    /// Marks the table as interrupted and wakes every cancellable wait.
    ///
    /// Idempotent. Has no effect on the flags if the run is already halted.
    pub fn interrupt(&self) {
        {
            let mut s = self.state.lock();
            if s.starved {
                return;
            }
            s.interrupted = true;
        }
        self.halt.cancel();
    }

    /// Completes once the table is halted (starvation or interrupt).
    pub fn halted(&self) -> WaitForCancellationFuture<'_> {
        self.halt.cancelled()
    }

    /// Token cancelled when the table is halted.
    pub fn halt_token(&self) -> &CancellationToken {
        &self.halt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_terminal_flag_wins() {
        let flags = Flags::new();
        assert!(!flags.is_over());

        assert!(flags.raise_quota_met());
        assert!(!flags.raise_starved());
        assert!(!flags.raise_quota_met());

        assert!(!flags.is_starved());
        assert!(flags.is_over());
        assert!(!flags.is_halted());
        assert!(!flags.halt_token().is_cancelled());
    }

    #[test]
    fn starvation_halts() {
        let flags = Flags::new();
        assert!(flags.raise_starved());
        assert!(flags.is_halted());
        assert!(flags.halt_token().is_cancelled());
        assert!(!flags.raise_quota_met());
    }

    #[test]
    fn interrupt_does_not_mask_an_announced_death() {
        let flags = Flags::new();
        assert!(flags.raise_starved());
        flags.interrupt();
        assert!(!flags.is_interrupted());
        assert!(flags.is_starved());
    }

    #[tokio::test]
    async fn halted_future_completes_on_interrupt() {
        let flags = std::sync::Arc::new(Flags::new());
        let waiter = {
            let flags = flags.clone();
            tokio::spawn(async move { flags.halted().await })
        };
        flags.interrupt();
        waiter.await.unwrap();
        assert!(flags.is_halted());
        assert!(!flags.raise_starved());
    }
}
