//! # Monitor: starvation and quota watcher.
//!
//! Polls every philosopher record at [`Config::poll_interval`](crate::Config) and
//! decides when the simulation is over.
//!
//! ## Per tick
//! ```text
//! for id in 1..=n:
//!   now = clock                         read before the record
//!   elapsed_at(now)                     (now - last_meal_ms, meals) under the record lock
//!   elapsed >= time_to_die              → announce_death(id) → Starved
//!   meals < must_eat                    → not everybody is fed yet
//! all fed (quota set)                   → raise_quota_met() → QuotaMet
//! ```
//!
//! ## Rules
//! - At most one "died" line is ever printed (the flag and the line share the output lock)
//! - Starvation is checked before the quota within a tick
//! - An interrupt ends the watch with [`Outcome::Interrupted`]

use std::sync::Arc;

use tokio::time::{self, MissedTickBehavior};

use crate::{
    core::outcome::Outcome,
    events::{Bus, Event, EventKind},
    table::Table,
};

/// Watches the table and declares the terminal outcome.
pub struct Monitor {
    table: Arc<Table>,
    bus: Bus,
}

impl Monitor {
    /// Creates a monitor for `table`.
    pub fn new(table: Arc<Table>, bus: Bus) -> Self {
        Self { table, bus }
    }

    /// Polls until a philosopher starves, the quota is met or the table is interrupted.
    pub async fn run(self) -> Outcome {
        let mut ticker = time::interval(self.table.config().poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.table.flags().halted() => return self.settled(),
                _ = ticker.tick() => {}
            }
            if let Some(outcome) = self.inspect() {
                return outcome;
            }
        }
    }

    /// One pass over every record. Returns the outcome if the run is over.
    pub fn inspect(&self) -> Option<Outcome> {
        let table = &*self.table;
        let cfg = table.config();
        let die_ms = duration_ms(cfg.time_to_die);
        let mut all_fed = cfg.must_eat.is_some();

        for id in table.ids() {
            let now = table.now_ms();
            let (elapsed, snapshot) = table.record(id).elapsed_at(now);
            if elapsed >= die_ms {
                let Some(line) = table.announce_death(id) else {
                    return Some(self.settled());
                };
                self.bus.publish(
                    Event::new(EventKind::StarvationDetected)
                        .with_philosopher(id)
                        .with_at_ms(line.at_ms)
                        .with_meals(snapshot.meals),
                );
                return Some(Outcome::Starved {
                    philosopher: id,
                    at_ms: line.at_ms,
                });
            }
            all_fed &= cfg.is_fed(snapshot.meals);
        }

        if !all_fed {
            return None;
        }
        if !table.flags().raise_quota_met() {
            return Some(self.settled());
        }
        let at_ms = table.now_ms();
        self.bus
            .publish(Event::new(EventKind::QuotaReached).with_at_ms(at_ms));
        Some(Outcome::QuotaMet { at_ms })
    }

    /// Outcome when something other than this monitor ended the run.
    fn settled(&self) -> Outcome {
        Outcome::Interrupted {
            at_ms: self.table.now_ms(),
        }
    }
}

fn duration_ms(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
