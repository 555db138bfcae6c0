//! # Simulation configuration.
//!
//! Provides [`Config`] centralized settings for one simulation run.
//!
//! Config is used in two ways:
//! 1. **Table construction**: `Table::new(config, sink)` copies it into the shared state
//! 2. **Task parameters**: philosophers and the monitor read timings from the table's copy
//!
//! ## Sentinel values
//! - `must_eat = None` → no quota (run until starvation or external stop)
//! - `stagger = 0s` → even philosophers start immediately
//!
//! The five "table" values mirror the command line and must be positive integers
//! no larger than `i32::MAX`; the remaining fields are tuning knobs with defaults.

use std::time::Duration;

use crate::{error::ConfigError, policies::ThinkPolicy};

/// Largest accepted value for a count or millisecond duration.
const MAX_VALUE: u64 = i32::MAX as u64;

/// Configuration of a single simulation.
///
/// ## Field semantics
/// - `philosophers`: number of seats, forks and actor tasks (`>= 1`)
/// - `time_to_die`: starvation deadline measured from the last meal start
/// - `time_to_eat` / `time_to_sleep`: hold durations
/// - `must_eat`: optional quota of meals per philosopher
/// - `poll_interval`: monitor period (bounds detection latency)
/// - `stagger`: start delay for even philosophers (`0s` = none)
/// - `think`: extra idle after "is thinking" (see [`ThinkPolicy`])
/// - `grace`: how long the supervisor waits for tasks after an interrupt or a panic
/// - `bus_capacity`: lifecycle event ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of philosophers (and forks).
    pub philosophers: usize,

    /// Starvation deadline.
    ///
    /// A philosopher whose last meal started `time_to_die` ago or earlier is reported dead.
    pub time_to_die: Duration,

    /// How long a philosopher holds both forks.
    pub time_to_eat: Duration,

    /// How long a philosopher sleeps after releasing its forks.
    pub time_to_sleep: Duration,

    /// Minimum number of meals every philosopher must reach to end the run.
    pub must_eat: Option<u32>,

    /// Monitor polling period.
    ///
    /// Keep it small relative to `time_to_die`; worst-case detection latency is one period.
    pub poll_interval: Duration,

    /// Delay before the first cycle of even-numbered philosophers.
    pub stagger: Duration,

    /// Extra idle time after thinking, before the next acquisition attempt.
    pub think: ThinkPolicy,

    /// Maximum time to wait for tasks to stop after an interrupt or a panic.
    ///
    /// Runs that end by starvation or quota join every task without a limit.
    pub grace: Duration,

    /// Capacity of the lifecycle event bus.
    pub bus_capacity: usize,
}

impl Config {
    /// Creates a configuration with the four mandatory timings and default tuning.
    pub fn new(
        philosophers: usize,
        time_to_die: Duration,
        time_to_eat: Duration,
        time_to_sleep: Duration,
    ) -> Self {
        Self {
            philosophers,
            time_to_die,
            time_to_eat,
            time_to_sleep,
            ..Self::default()
        }
    }

    /// Creates a configuration from raw millisecond values, as given on the command line.
    pub fn from_millis(philosophers: usize, die: u64, eat: u64, sleep: u64) -> Self {
        Self::new(
            philosophers,
            Duration::from_millis(die),
            Duration::from_millis(eat),
            Duration::from_millis(sleep),
        )
    }

    /// Returns a new config with the given meal quota.
    pub fn with_must_eat(mut self, must_eat: Option<u32>) -> Self {
        self.must_eat = must_eat;
        self
    }

    /// Returns a new config with the given think policy.
    pub fn with_think(mut self, think: ThinkPolicy) -> Self {
        self.think = think;
        self
    }

    /// Checks that the configuration describes a runnable simulation.
    ///
    /// Every table value must be strictly positive and representable as a signed
    /// 32-bit integer; `poll_interval` must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("philosophers", self.philosophers as u64)?;
        check("time_to_die", millis(self.time_to_die))?;
        check("time_to_eat", millis(self.time_to_eat))?;
        check("time_to_sleep", millis(self.time_to_sleep))?;
        if let Some(n) = self.must_eat {
            check("must_eat", u64::from(n))?;
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "poll_interval",
            });
        }
        Ok(())
    }

    /// Returns the even-seat start delay as an `Option`.
    ///
    /// - `None` → no stagger
    /// - `Some(d)` → even philosophers wait `d` before their first cycle
    #[inline]
    pub fn start_stagger(&self) -> Option<Duration> {
        if self.stagger.is_zero() {
            None
        } else {
            Some(self.stagger)
        }
    }

    /// Returns the idle time appended to every thinking phase, if any.
    #[inline]
    pub fn think_delay(&self) -> Option<Duration> {
        self.think.delay(self)
    }

    /// Returns `true` when the configured quota is reached by `meals`.
    #[inline]
    pub fn is_fed(&self, meals: u32) -> bool {
        self.must_eat.is_some_and(|quota| meals >= quota)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `philosophers = 5`, `800 / 200 / 200 ms`, no quota
    /// - `poll_interval = 1ms`
    /// - `stagger = 1ms`
    /// - `think = ThinkPolicy::Balanced`
    /// - `grace = 5s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            philosophers: 5,
            time_to_die: Duration::from_millis(800),
            time_to_eat: Duration::from_millis(200),
            time_to_sleep: Duration::from_millis(200),
            must_eat: None,
            poll_interval: Duration::from_millis(1),
            stagger: Duration::from_millis(1),
            think: ThinkPolicy::default(),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn check(field: &'static str, value: u64) -> Result<(), ConfigError> {
    match value {
        0 => Err(ConfigError::NonPositive { field }),
        v if v > MAX_VALUE => Err(ConfigError::TooLarge { field, value: v }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn zero_philosophers_are_rejected() {
        let cfg = Config::from_millis(0, 800, 200, 200);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "philosophers"
            })
        );
    }

    #[test]
    fn sub_millisecond_durations_count_as_zero() {
        let cfg = Config::new(
            2,
            Duration::from_millis(800),
            Duration::from_micros(500),
            Duration::from_millis(200),
        );
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "time_to_eat"
            })
        );
    }

    #[test]
    fn values_above_i32_are_rejected() {
        let cfg = Config::from_millis(2, MAX_VALUE + 1, 200, 200);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::TooLarge {
                field: "time_to_die",
                value: MAX_VALUE + 1
            })
        );
        let ok = Config::from_millis(2, MAX_VALUE, 200, 200);
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn zero_quota_is_rejected() {
        let cfg = Config::default().with_must_eat(Some(0));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "must_eat" })
        );
    }

    #[test]
    fn quota_helpers() {
        let cfg = Config::default().with_must_eat(Some(3));
        assert!(!cfg.is_fed(2));
        assert!(cfg.is_fed(3));
        assert!(!Config::default().is_fed(u32::MAX));
    }

    #[test]
    fn stagger_sentinel() {
        let mut cfg = Config::default();
        assert_eq!(cfg.start_stagger(), Some(Duration::from_millis(1)));
        cfg.stagger = Duration::ZERO;
        assert_eq!(cfg.start_stagger(), None);
    }
}
