//! # symposium
//!
//! **Symposium** is a dining philosophers simulation built on tokio.
//!
//! `N` philosophers sit around a table with `N` forks, one between each pair of
//! neighbours. Each philosopher repeatedly takes both adjacent forks, eats, puts the
//! forks down, sleeps and thinks. A monitor stops the run as soon as someone has
//! gone `time_to_die` without starting a meal, or once everybody has eaten
//! `must_eat` times. Every state change is printed as one line
//! `"<ms since start> <id> <message>"`; nothing follows a "died" line.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ Philosopher 1│   │ Philosopher 2│   │ Philosopher N│      one task each
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ acquire_both / report / record_meal │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Table (Arc, shared)                                              │
//! │  - forks: Vec<Fork>        tokio Mutex each, FIFO, cancellable    │
//! │  - records: Vec<Record>    last_meal_ms + meals, one lock each    │
//! │  - flags: Flags            starved / quota_met / interrupted      │
//! │  - reporter: Reporter      output lock, strict cutoff             │
//! └───────────────────────────────▲───────────────────────────────────┘
//!                                 │ elapsed_at / announce_death / raise_quota_met
//!                          ┌──────┴───────┐
//!                          │   Monitor    │   polls every poll_interval
//!                          └──────────────┘
//!
//! Lifecycle events (Philosopher, Monitor, Supervisor)
//!      └─► Bus (broadcast) ─► subscriber_listener ─► SubscriberSet
//!                                                 ┌────────┼────────┐
//!                                                 ▼        ▼        ▼
//!                                             LogWriter  custom   custom
//! ```
//!
//! ### Lifecycle
//! ```text
//! Config ──► Supervisor::builder(cfg).build()? ──► Supervisor::run()
//!
//!   ├─► Table built, clock starts
//!   ├─► spawn N philosophers + monitor
//!   ├─► wait for: Starved | QuotaMet | signal / Interrupter
//!   ├─► join all (within cfg.grace after an interrupt)
//!   └─► Summary { outcome, elapsed_ms, meals }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Simulation**    | Run a table to its end.                                      | [`Supervisor`], [`Summary`], [`Outcome`]    |
//! | **Output**        | Where status lines go.                                       | [`Sink`], [`StdoutSink`], [`MemorySink`]    |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics, custom).       | [`Subscribe`], [`LogWriter`]                |
//! | **Policies**      | Tune contention.                                             | [`ThinkPolicy`]                             |
//! | **Errors**        | Typed errors for configuration and runtime.                  | [`ConfigError`], [`RuntimeError`]           |
//! | **Configuration** | Timings, quota, runtime knobs.                               | [`Config`]                                  |
//!
//! ## Example
//! ```rust
//! use symposium::{Config, MemorySink, Outcome, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread", start_paused = true)]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::from_millis(4, 800, 200, 200).with_must_eat(Some(3));
//!     let sink = MemorySink::new();
//!
//!     let sup = Supervisor::builder(cfg)
//!         .with_sink(sink.clone())
//!         .with_os_signals(false)
//!         .build()?;
//!
//!     let summary = sup.run().await?;
//!     assert!(matches!(summary.outcome, Outcome::QuotaMet { .. }));
//!     assert!(summary.meals.iter().all(|&m| m >= 3));
//!     assert!(sink.rendered().iter().all(|l| !l.ends_with("died")));
//!     Ok(())
//! }
//! ```
mod clock;
mod config;
mod core;
mod error;
mod events;
mod policies;
mod report;
mod subscribers;
mod table;

// ---- Public re-exports ----

pub use clock::Clock;
pub use config::Config;
pub use core::{Interrupter, Monitor, Outcome, Philosopher, Summary, Supervisor, SupervisorBuilder};
pub use error::{ConfigError, RuntimeError, TableError};
pub use events::{Bus, Event, EventKind};
pub use policies::{ParseThinkPolicyError, ThinkPolicy};
pub use report::{MemorySink, Reporter, Sink, Status, StatusLine, StdoutSink};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use table::{Flags, Fork, ForkGuard, HeldForks, MealSnapshot, Order, Record, Table, acquire_both};
