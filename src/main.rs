//! Symposium command line.
//!
//! Runs one dining philosophers simulation and prints every state change on stdout.
//!
//! # Example
//!
//! ```bash
//! # 5 philosophers, die after 800 ms, eat 200 ms, sleep 200 ms, stop after 7 meals each
//! symposium 5 800 200 200 7
//!
//! # lifecycle logging on stderr
//! symposium 4 410 200 200 -v
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::{ArgAction, Parser};
use symposium::{Config, ConfigError, LogWriter, Subscribe, Supervisor, ThinkPolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Dining philosophers simulation.
///
/// Prints `<ms since start> <philosopher> <action>` for every state change and stops
/// when a philosopher starves or, if given, every philosopher has eaten `must_eat` times.
#[derive(Parser, Debug)]
#[command(name = "symposium")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of philosophers (and forks)
    number_of_philosophers: u64,

    /// Milliseconds a philosopher survives without starting a meal
    time_to_die: u64,

    /// Milliseconds spent eating
    time_to_eat: u64,

    /// Milliseconds spent sleeping
    time_to_sleep: u64,

    /// Stop once every philosopher has eaten this many times
    must_eat: Option<u64>,

    /// Monitor polling period in milliseconds
    #[arg(long, default_value = "1")]
    poll_ms: u64,

    /// Start delay for even philosophers in milliseconds (0 = none)
    #[arg(long, default_value = "1")]
    stagger_ms: u64,

    /// Idle after thinking: `none`, `balanced` or a number of milliseconds
    #[arg(long, default_value = "balanced")]
    think: ThinkPolicy,

    /// Milliseconds to wait for every task after an interrupt
    #[arg(long, default_value = "5000")]
    grace_ms: u64,

    /// Ignore SIGINT / SIGTERM / SIGQUIT
    #[arg(long)]
    no_signals: bool,

    /// Lifecycle logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Result<Config, ConfigError> {
        let philosophers = usize::try_from(self.number_of_philosophers).map_err(|_| {
            ConfigError::TooLarge {
                field: "number_of_philosophers",
                value: self.number_of_philosophers,
            }
        })?;
        let must_eat = self
            .must_eat
            .map(|n| {
                u32::try_from(n).map_err(|_| ConfigError::TooLarge {
                    field: "must_eat",
                    value: n,
                })
            })
            .transpose()?;

        let mut cfg = Config::from_millis(
            philosophers,
            self.time_to_die,
            self.time_to_eat,
            self.time_to_sleep,
        )
        .with_must_eat(must_eat)
        .with_think(self.think);
        cfg.poll_interval = Duration::from_millis(self.poll_ms);
        cfg.stagger = Duration::from_millis(self.stagger_ms);
        cfg.grace = Duration::from_millis(self.grace_ms);
        cfg.validate()?;
        Ok(cfg)
    }

    fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.default_filter())),
        )
        .init();

    let cfg = args.config().context("invalid arguments")?;
    info!(
        philosophers = cfg.philosophers,
        time_to_die_ms = args.time_to_die,
        time_to_eat_ms = args.time_to_eat,
        time_to_sleep_ms = args.time_to_sleep,
        must_eat = ?cfg.must_eat,
        think = %cfg.think,
        "starting simulation"
    );

    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let summary = Supervisor::builder(cfg)
        .with_subscribers(subscribers)
        .with_os_signals(!args.no_signals)
        .build()?
        .run()
        .await?;

    info!(
        outcome = summary.outcome.as_label(),
        detail = %summary.outcome,
        elapsed_ms = summary.elapsed_ms,
        meals = ?summary.meals,
        "simulation finished"
    );
    Ok(())
}
