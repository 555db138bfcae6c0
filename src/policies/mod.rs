//! Cycle tuning policies.
//!
//! This module groups the knobs that shape **when** a philosopher reaches for its
//! forks. None of them is needed for deadlock freedom; they only reduce contention.
//!
//! ## Contents
//! - [`ThinkPolicy`] idle time appended to the thinking phase
//!
//! ## Quick wiring
//! ```text
//! Config { think: ThinkPolicy, stagger: Duration, .. }
//!      └─► core::philosopher::Philosopher uses:
//!           - stagger before the first cycle (even seats)
//!           - think.delay(cfg) after every "is thinking"
//! ```
//!
//! ## Defaults
//! - `ThinkPolicy::Balanced` (idles only on odd tables).

mod think;

pub use think::{ParseThinkPolicyError, ThinkPolicy};
