//! # Event subscribers for the simulation runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Philosopher / Monitor / Supervisor ── publish(Event) ──► Bus
//!                                                           │
//!                                              subscriber_listener (Supervisor)
//!                                                           │
//!                                                     SubscriberSet
//!                                                ┌──────────┼──────────┐
//!                                                ▼          ▼          ▼
//!                                            LogWriter   Metrics    Custom
//! ```

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
