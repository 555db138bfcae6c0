//! # Shared table state.
//!
//! The [`Table`] is the single value shared (through `Arc`) by every philosopher
//! task and the monitor. It owns the configuration, the clock, the forks, one
//! record per philosopher, the termination flags and the status reporter.
//!
//! ## Synchronization domains
//! ```text
//! (a) Record lock    one per philosopher   last meal + meal count
//! (b) Flags lock     one per table         starved / quota_met / interrupted
//! (c) Output lock    one per table         one status line at a time
//! ```
//! None of them is held across a fork acquisition or a timed wait. Only the
//! reporter nests two of them, always (c) → (b).
//!
//! ## Lifecycle
//! Built by the supervisor before any task starts; every task holds an `Arc`
//! and the supervisor joins all of them before the last `Arc` is dropped.

mod flags;
mod fork;
mod record;

pub use flags::Flags;
pub use fork::{Fork, ForkGuard, HeldForks, Order, acquire_both};
pub use record::{MealSnapshot, Record};

use std::{ops::RangeInclusive, sync::Arc};

use crate::{
    clock::Clock,
    config::Config,
    error::TableError,
    report::{Reporter, Sink, Status, StatusLine},
};

/// State shared by all tasks of one simulation.
pub struct Table {
    config: Config,
    clock: Clock,
    forks: Vec<Fork>,
    records: Vec<Record>,
    flags: Flags,
    reporter: Reporter,
}

impl Table {
    /// Validates `config` and builds a table writing status lines to `sink`.
    ///
    /// The simulation clock starts here.
    pub fn new(config: Config, sink: impl Sink) -> Result<Arc<Self>, TableError> {
        Self::with_reporter(config, Reporter::new(sink))
    }

    /// Same as [`Table::new`] with a prepared reporter.
    pub fn with_reporter(config: Config, reporter: Reporter) -> Result<Arc<Self>, TableError> {
        config.validate()?;
        let n = config.philosophers;

        let mut forks = Vec::new();
        forks
            .try_reserve_exact(n)
            .map_err(|_| TableError::Allocation { what: "forks", count: n })?;
        forks.extend((0..n).map(Fork::new));

        let mut records = Vec::new();
        records
            .try_reserve_exact(n)
            .map_err(|_| TableError::Allocation { what: "records", count: n })?;
        records.extend(std::iter::repeat_with(Record::new).take(n));

        Ok(Arc::new(Self {
            config,
            clock: Clock::start(),
            forks,
            records,
            flags: Flags::new(),
            reporter,
        }))
    }

    /// Simulation configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Simulation clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Termination flags.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Number of philosophers.
    pub fn seats(&self) -> usize {
        self.records.len()
    }

    /// Iterates over philosopher ids (`1..=n`).
    pub fn ids(&self) -> RangeInclusive<usize> {
        1..=self.records.len()
    }

    /// Milliseconds since the simulation started.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Left and right fork of philosopher `id`.
    ///
    /// With a single philosopher both are the same fork.
    ///
    /// # Panics
    /// If `id` is not in `1..=n`.
    pub fn forks_of(&self, id: usize) -> (&Fork, &Fork) {
        let n = self.forks.len();
        (&self.forks[id - 1], &self.forks[id % n])
    }

    /// Record of philosopher `id`.
    ///
    /// # Panics
    /// If `id` is not in `1..=n`.
    pub fn record(&self, id: usize) -> &Record {
        &self.records[id - 1]
    }

    /// Stamps a meal for philosopher `id` at the current time.
    pub fn record_meal(&self, id: usize) -> MealSnapshot {
        self.record(id).stamp(self.now_ms())
    }

    /// Meal counts of every philosopher, in id order.
    pub fn meals(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.snapshot().meals).collect()
    }

    /// Prints a status line for `id` unless the run was halted.
    pub fn report(&self, id: usize, status: Status) -> bool {
        self.reporter.report(&self.flags, &self.clock, id, status)
    }

    /// Raises `starved` and prints the single "died" line for `id`.
    pub fn announce_death(&self, id: usize) -> Option<StatusLine> {
        self.reporter.announce_death(&self.flags, &self.clock, id)
    }
}
