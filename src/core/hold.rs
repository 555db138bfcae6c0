//! # Cancellable timed wait.
//!
//! Used for eating, sleeping, thinking idles, the start stagger and the lone
//! philosopher's death wait. The wait ends early the moment the table is halted
//! (starvation or interrupt). A raised quota does not cut it short: the meal or
//! nap that satisfied the quota is allowed to finish.

use std::time::Duration;

use tokio::time;

use crate::table::Flags;

/// Waits for `dur` unless the table halts first.
///
/// Returns `true` if the full duration elapsed, `false` if the wait was cut short
/// (or the table was already halted).
pub async fn hold(flags: &Flags, dur: Duration) -> bool {
    if flags.is_halted() {
        return false;
    }
    tokio::select! {
        biased;
        _ = flags.halted() => false,
        _ = time::sleep(dur) => true,
    }
}
