//! # External stop requests.
//!
//! Two ways to end a run from outside the table:
//! - [`wait_for_shutdown_signal`]: completes when the process receives a termination signal
//! - [`Interrupter`]: a cloneable handle for embedders and tests
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use tokio_util::sync::CancellationToken;

/// Waits for a termination signal.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Returns `Ok(())` when any signal is received, or `Err` if signal registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Handle that stops a running simulation.
///
/// Obtained from [`Supervisor::interrupter`](crate::Supervisor::interrupter). Interrupting
/// halts every philosopher, suppresses further status lines and ends the run with
/// [`Outcome::Interrupted`](crate::Outcome::Interrupted). Interrupting after the run is
/// already over has no effect.
#[derive(Clone, Debug, Default)]
pub struct Interrupter {
    token: CancellationToken,
}

impl Interrupter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop.
    pub fn interrupt(&self) {
        self.token.cancel();
    }

    /// True once [`interrupt`](Self::interrupt) was called.
    pub fn is_interrupted(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) async fn interrupted(&self) {
        self.token.cancelled().await;
    }
}
