//! # Philosopher: one seat at the table.
//!
//! Each philosopher runs as its own task and loops through the same cycle until
//! the table tells it to stop.
//!
//! ## Cycle
//! ```text
//! [even id: stagger]
//! loop {
//!   ├─► stop if the simulation is over (starved / quota met / interrupted)
//!   ├─► acquire_both(left, right, order)      report "has taken a fork" ×2
//!   ├─► report "is eating", stamp last meal + count
//!   ├─► hold(time_to_eat)                     cut short only on halt
//!   ├─► release forks (reverse order)
//!   ├─► report "is sleeping", hold(time_to_sleep)
//!   └─► report "is thinking", hold(think delay)
//! }
//! ```
//!
//! ## Rules
//! - Even ids take their right fork first, odd ids their left fork first
//! - Forks are released in reverse acquisition order, and always before sleeping
//! - A fork wait, meal, nap or think idle ends early on starvation or interrupt
//! - A raised quota lets the current step finish; the loop exits at its top
//! - A lone philosopher takes its only fork and waits for the monitor to declare it dead

use std::sync::Arc;

use crate::{
    core::hold::hold,
    events::{Bus, Event, EventKind},
    report::Status,
    table::{Order, Table, acquire_both},
};

/// A single diner driven by its own task.
pub struct Philosopher {
    id: usize,
    table: Arc<Table>,
    bus: Bus,
}

impl Philosopher {
    /// Creates the philosopher sitting at seat `id` (1-based).
    pub fn new(id: usize, table: Arc<Table>, bus: Bus) -> Self {
        Self { id, table, bus }
    }

    /// Seat number of this philosopher.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Runs the philosopher until the simulation ends.
    ///
    /// Publishes [`EventKind::PhilosopherStarted`] on entry and
    /// [`EventKind::PhilosopherStopped`] (with the meal count) on exit.
    pub async fn run(self) {
        self.bus
            .publish(Event::new(EventKind::PhilosopherStarted).with_philosopher(self.id));

        if self.table.seats() == 1 {
            self.dine_alone().await;
        } else if self.stagger().await {
            while self.cycle().await {}
        }

        let meals = self.table.record(self.id).snapshot().meals;
        self.bus.publish(
            Event::new(EventKind::PhilosopherStopped)
                .with_philosopher(self.id)
                .with_meals(meals)
                .with_at_ms(self.table.now_ms()),
        );
    }

    /// Delays even seats so odd seats get first pick of the shared forks.
    async fn stagger(&self) -> bool {
        match self.table.config().start_stagger() {
            Some(delay) if self.id % 2 == 0 => hold(self.table.flags(), delay).await,
            _ => true,
        }
    }

    /// One eat / sleep / think round. Returns `false` once the philosopher must stop.
    async fn cycle(&self) -> bool {
        let table = &*self.table;
        let flags = table.flags();
        if flags.is_over() {
            return false;
        }

        let (left, right) = table.forks_of(self.id);
        let held = acquire_both(
            left,
            right,
            Order::for_philosopher(self.id),
            flags.halt_token(),
            |fork| {
                table.report(self.id, Status::TookFork { fork: fork.index() });
            },
        )
        .await;
        let Some(held) = held else {
            return false;
        };

        table.report(self.id, Status::Eating);
        table.record_meal(self.id);
        let fed = hold(flags, table.config().time_to_eat).await;
        held.release();
        if !fed {
            return false;
        }

        table.report(self.id, Status::Sleeping);
        if !hold(flags, table.config().time_to_sleep).await {
            return false;
        }

        table.report(self.id, Status::Thinking);
        match table.config().think_delay() {
            Some(delay) => hold(flags, delay).await,
            None => true,
        }
    }

    /// A single seat has a single fork: take it and wait to be declared dead.
    async fn dine_alone(&self) {
        let table = &*self.table;
        let (fork, _) = table.forks_of(self.id);
        let Some(guard) = fork.acquire(table.flags().halt_token()).await else {
            return;
        };
        table.report(self.id, Status::TookFork { fork: guard.index() });
        hold(table.flags(), table.config().time_to_die).await;
        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, policies::ThinkPolicy, report::MemorySink};
    use std::time::Duration;

    fn table(cfg: Config) -> (Arc<Table>, MemorySink) {
        let sink = MemorySink::new();
        let table = Table::new(cfg, sink.clone()).unwrap();
        (table, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_interrupt_mid_meal() {
        let cfg = Config::from_millis(2, 10_000, 200, 200).with_think(ThinkPolicy::None);
        let (table, sink) = table(cfg);
        let bus = Bus::new(64);

        let handle = tokio::spawn(Philosopher::new(1, table.clone(), bus).run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        table.flags().interrupt();
        handle.await.unwrap();

        assert_eq!(
            sink.rendered(),
            vec![
                "0 1 has taken a fork",
                "0 1 has taken a fork",
                "0 1 is eating",
            ]
        );
        assert_eq!(table.record(1).snapshot().meals, 1);
        assert!(forks_are_free(&table));
    }

    fn forks_are_free(table: &Table) -> bool {
        let (left, right) = table.forks_of(1);
        left.try_acquire().is_some() && right.try_acquire().is_some()
    }

    #[tokio::test(start_paused = true)]
    async fn lone_philosopher_takes_one_fork() {
        let cfg = Config::from_millis(1, 800, 200, 200);
        let (table, sink) = table(cfg);
        let bus = Bus::new(64);

        let handle = tokio::spawn(Philosopher::new(1, table.clone(), bus).run());
        tokio::time::sleep(Duration::from_millis(900)).await;
        handle.await.unwrap();

        assert_eq!(sink.rendered(), vec!["0 1 has taken a fork"]);
        assert_eq!(table.record(1).snapshot().meals, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn quota_lets_the_nap_finish() {
        let cfg = Config::from_millis(2, 10_000, 100, 100).with_think(ThinkPolicy::None);
        let (table, sink) = table(cfg);
        let bus = Bus::new(64);

        let handle = tokio::spawn(Philosopher::new(1, table.clone(), bus).run());
        tokio::time::sleep(Duration::from_millis(150)).await;
        table.flags().raise_quota_met();
        handle.await.unwrap();

        assert_eq!(
            sink.rendered(),
            vec![
                "0 1 has taken a fork",
                "0 1 has taken a fork",
                "0 1 is eating",
                "100 1 is sleeping",
                "200 1 is thinking",
            ]
        );
    }
}
