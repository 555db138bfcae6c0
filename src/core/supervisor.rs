//! # Supervisor: seats the philosophers, runs the monitor, shuts everything down.
//!
//! The [`Supervisor`] owns the event bus, the subscriber list and the configuration
//! of one simulation. [`Supervisor::run`] builds the shared [`Table`], spawns one task
//! per philosopher plus the monitor, waits for a terminal outcome and joins every
//! task. Only an external stop or a panic bounds that join by [`Config::grace`].
//!
//! ## High-level architecture
//! ```text
//! Supervisor::run()
//!   ├─► Table::with_reporter(cfg, reporter)         clock starts here
//!   ├─► subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)
//!   ├─► publish SimulationStarted
//!   ├─► JoinSet ◄── Philosopher::run() × N
//!   ├─► spawn Monitor::run()
//!   │
//!   ├─► select! {
//!   │     monitor finished         → Starved / QuotaMet
//!   │     OS signal | Interrupter  → publish ShutdownRequested
//!   │                                flags.interrupt() → monitor → Interrupted
//!   │   }
//!   ├─► wait_all(limit):
//!   │     Starved / QuotaMet        → limit = None (holds end on their own)
//!   │     interrupted (stop, panic) → limit = cfg.grace
//!   │     ├─ Ok (all joined)  → publish AllStopped
//!   │     └─ timeout          → abort_all, publish GraceExceeded
//!   └─► stop listener, drain, SubscriberSet::shutdown()
//! ```
//!
//! ## Rules
//! - One simulation per supervisor (`run` consumes `self`)
//! - The table is interrupted whenever a task panics, so the remaining tasks stop
//! - Events published before `run` returns are delivered to every subscriber

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::broadcast::error::{RecvError, TryRecvError},
    task::{self, JoinHandle, JoinSet},
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{
    config::Config,
    core::{
        builder::SupervisorBuilder,
        monitor::Monitor,
        outcome::{Outcome, Summary},
        philosopher::Philosopher,
        shutdown::{self, Interrupter},
    },
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    report::Reporter,
    subscribers::{Subscribe, SubscriberSet},
    table::Table,
};

/// Coordinates philosophers, the monitor, event delivery and shutdown.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
    reporter: Reporter,
    interrupter: Interrupter,
    os_signals: bool,
}

impl Supervisor {
    /// Starts building a supervisor for `cfg`.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        subscribers: Vec<Arc<dyn Subscribe>>,
        reporter: Reporter,
        os_signals: bool,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            subscribers,
            reporter,
            interrupter: Interrupter::new(),
            os_signals,
        }
    }

    /// The configuration this supervisor runs.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Handle that stops the run from outside.
    pub fn interrupter(&self) -> Interrupter {
        self.interrupter.clone()
    }

    /// Runs the simulation to its end.
    ///
    /// Returns the [`Summary`] once every philosopher has stopped. A starved
    /// philosopher is a regular outcome, not an error.
    ///
    /// # Errors
    /// - [`RuntimeError::Table`] if the table cannot be built
    /// - [`RuntimeError::TaskPanicked`] if a philosopher or the monitor panicked
    /// - [`RuntimeError::GraceExceeded`] if tasks were still running after the grace period
    ///   that follows an external stop
    pub async fn run(self) -> Result<Summary, RuntimeError> {
        let Supervisor {
            cfg,
            bus,
            subscribers,
            reporter,
            interrupter,
            os_signals,
        } = self;

        let table = Table::with_reporter(cfg, reporter)?;
        let stop_listener = CancellationToken::new();
        let listener = subscriber_listener(&bus, subscribers, stop_listener.clone());

        bus.publish(Event::new(EventKind::SimulationStarted).with_count(table.seats()));

        let mut set = JoinSet::new();
        let names = spawn_philosophers(&mut set, &table, &bus);
        let monitor = tokio::spawn(Monitor::new(table.clone(), bus.clone()).run());

        let driven = drive(&table, &bus, monitor, &interrupter, os_signals).await;
        if driven.is_err() {
            table.flags().interrupt();
        }
        let limit = table
            .flags()
            .is_interrupted()
            .then_some(table.config().grace);
        let joined = wait_all(&table, &bus, &mut set, &names, limit).await;

        stop_listener.cancel();
        let _ = listener.await;

        let outcome = driven?;
        joined?;
        Ok(Summary {
            outcome,
            elapsed_ms: table.now_ms(),
            meals: table.meals(),
        })
    }
}

/// Subscribes to the bus and forwards events to the subscriber set until `stop`.
///
/// Events still queued on the bus when `stop` fires are drained before the
/// subscriber workers are shut down.
fn subscriber_listener(
    bus: &Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
    stop: CancellationToken,
) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    let set = SubscriberSet::new(subscribers, bus.clone());
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                res = rx.recv() => match res {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
        loop {
            match rx.try_recv() {
                Ok(ev) => set.emit(&ev),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        set.shutdown().await;
    })
}

/// Spawns one task per seat; returns task ids mapped to seat numbers.
fn spawn_philosophers(
    set: &mut JoinSet<()>,
    table: &Arc<Table>,
    bus: &Bus,
) -> HashMap<task::Id, usize> {
    let mut names = HashMap::with_capacity(table.seats());
    for id in table.ids() {
        let handle = set.spawn(Philosopher::new(id, Arc::clone(table), bus.clone()).run());
        names.insert(handle.id(), id);
    }
    names
}

/// Waits for the monitor's verdict or an external stop request.
async fn drive(
    table: &Table,
    bus: &Bus,
    mut monitor: JoinHandle<Outcome>,
    interrupter: &Interrupter,
    os_signals: bool,
) -> Result<Outcome, RuntimeError> {
    let verdict = tokio::select! {
        res = &mut monitor => res,
        _ = stop_requested(interrupter, os_signals) => {
            bus.publish(Event::new(EventKind::ShutdownRequested));
            table.flags().interrupt();
            monitor.await
        }
    };
    verdict.map_err(|_| RuntimeError::TaskPanicked {
        task: "monitor".to_string(),
    })
}

/// Completes on an OS signal (if enabled) or an [`Interrupter`] request.
async fn stop_requested(interrupter: &Interrupter, os_signals: bool) {
    if !os_signals {
        return interrupter.interrupted().await;
    }
    tokio::select! {
        res = shutdown::wait_for_shutdown_signal() => {
            if let Err(e) = res {
                warn!(target: "symposium", error = %e, "signal handlers unavailable");
                interrupter.interrupted().await;
            }
        }
        _ = interrupter.interrupted() => {}
    }
}

/// Joins every philosopher, waiting at most `limit` when one is given.
///
/// After starvation every hold is cut short, and after the quota every philosopher
/// finishes its current step and stops, so those runs are joined without a limit.
/// Publishes [`EventKind::AllStopped`] on success, or [`EventKind::GraceExceeded`]
/// after aborting whatever is still running.
async fn wait_all(
    table: &Table,
    bus: &Bus,
    set: &mut JoinSet<()>,
    names: &HashMap<task::Id, usize>,
    limit: Option<Duration>,
) -> Result<(), RuntimeError> {
    let mut panicked: Option<RuntimeError> = None;

    let done = async {
        while let Some(res) = set.join_next().await {
            let Err(err) = res else { continue };
            if !err.is_panic() {
                continue;
            }
            table.flags().interrupt();
            let task = match names.get(&err.id()) {
                Some(id) => format!("philosopher-{id}"),
                None => "philosopher".to_string(),
            };
            panicked.get_or_insert(RuntimeError::TaskPanicked { task });
        }
    };

    let finished = match limit {
        Some(grace) => tokio::time::timeout(grace, done).await.map_err(|_| grace),
        None => {
            done.await;
            Ok(())
        }
    };
    if let Err(grace) = finished {
        let remaining = set.len();
        set.abort_all();
        while set.join_next().await.is_some() {}
        bus.publish(Event::new(EventKind::GraceExceeded).with_count(remaining));
        return Err(RuntimeError::GraceExceeded { grace, remaining });
    }

    bus.publish(Event::new(EventKind::AllStopped).with_at_ms(table.now_ms()));
    match panicked {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
