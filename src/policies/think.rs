//! # Think policy for philosopher cycles.
//!
//! [`ThinkPolicy`] decides how long a philosopher idles after reporting
//! "is thinking" and before it reaches for its forks again.
//!
//! - [`ThinkPolicy::None`]: re-enter the acquisition immediately
//! - [`ThinkPolicy::Fixed`]: idle for a constant duration
//! - [`ThinkPolicy::Balanced`]: idle just long enough to let neighbours eat (odd tables only)
//!
//! The idle is a tuning knob: deadlock freedom comes from the fork order alone.
//! With an odd number of seats a philosopher that re-acquires the instant it wakes
//! can keep winning the race for a shared fork, so `Balanced` spaces the cycles to
//! `2 × eat`, never pushing a full cycle past the starvation deadline.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use symposium::{Config, ThinkPolicy};
//!
//! let cfg = Config::from_millis(5, 800, 200, 100);
//! assert_eq!(ThinkPolicy::Balanced.delay(&cfg), Some(Duration::from_millis(300)));
//!
//! let even = Config::from_millis(4, 800, 200, 100);
//! assert_eq!(ThinkPolicy::Balanced.delay(&even), None);
//! ```

use std::{fmt, str::FromStr, time::Duration};

use crate::config::Config;

/// Policy controlling the idle time appended to the thinking phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThinkPolicy {
    /// Think for zero time: try to acquire forks again right after sleeping.
    None,

    /// Think for a constant duration.
    Fixed(Duration),

    /// For odd tables idle `2 × eat − sleep`, capped below the remaining deadline;
    /// even tables do not idle.
    #[default]
    Balanced,
}

impl ThinkPolicy {
    /// Resolves the idle time for the given configuration.
    ///
    /// Returns `None` when no idle is needed (zero duration).
    pub fn delay(&self, cfg: &Config) -> Option<Duration> {
        let d = match self {
            ThinkPolicy::None => Duration::ZERO,
            ThinkPolicy::Fixed(d) => *d,
            ThinkPolicy::Balanced => balanced(cfg),
        };
        if d.is_zero() { None } else { Some(d) }
    }
}

fn balanced(cfg: &Config) -> Duration {
    if cfg.philosophers % 2 == 0 {
        return Duration::ZERO;
    }
    let wanted = cfg
        .time_to_eat
        .saturating_mul(2)
        .saturating_sub(cfg.time_to_sleep);
    let headroom = cfg
        .time_to_die
        .saturating_sub(cfg.time_to_eat)
        .saturating_sub(cfg.time_to_sleep)
        .saturating_sub(Duration::from_millis(1));
    wanted.min(headroom)
}

impl fmt::Display for ThinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThinkPolicy::None => f.write_str("none"),
            ThinkPolicy::Fixed(d) => write!(f, "{}", d.as_millis()),
            ThinkPolicy::Balanced => f.write_str("balanced"),
        }
    }
}

/// Error returned when parsing a [`ThinkPolicy`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected `none`, `balanced` or a number of milliseconds, got {0:?}")]
pub struct ParseThinkPolicyError(String);

impl FromStr for ThinkPolicy {
    type Err = ParseThinkPolicyError;

    /// Parses `none`, `balanced` or a millisecond count (`0` is the same as `none`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(ThinkPolicy::None),
            "balanced" => Ok(ThinkPolicy::Balanced),
            other => other
                .parse::<u64>()
                .map(|ms| ThinkPolicy::Fixed(Duration::from_millis(ms)))
                .map_err(|_| ParseThinkPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_spaces_odd_tables() {
        let cfg = Config::from_millis(5, 800, 200, 200);
        assert_eq!(
            ThinkPolicy::Balanced.delay(&cfg),
            Some(Duration::from_millis(200))
        );
    }

    #[test]
    fn balanced_is_capped_by_deadline() {
        // 2 × 200 − 100 = 300, but only 610 − 200 − 100 − 1 = 309 is left: 300 fits.
        let cfg = Config::from_millis(3, 610, 200, 100);
        assert_eq!(
            ThinkPolicy::Balanced.delay(&cfg),
            Some(Duration::from_millis(300))
        );

        // 2 × 200 − 100 = 300, only 450 − 200 − 100 − 1 = 149 is left.
        let tight = Config::from_millis(3, 450, 200, 100);
        assert_eq!(
            ThinkPolicy::Balanced.delay(&tight),
            Some(Duration::from_millis(149))
        );
    }

    #[test]
    fn balanced_never_idles_when_sleep_covers_it() {
        let cfg = Config::from_millis(5, 800, 100, 300);
        assert_eq!(ThinkPolicy::Balanced.delay(&cfg), None);
    }

    #[test]
    fn balanced_skips_even_tables() {
        let cfg = Config::from_millis(4, 410, 200, 200);
        assert_eq!(ThinkPolicy::Balanced.delay(&cfg), None);
    }

    #[test]
    fn fixed_and_none() {
        let cfg = Config::default();
        assert_eq!(ThinkPolicy::None.delay(&cfg), None);
        assert_eq!(
            ThinkPolicy::Fixed(Duration::from_millis(7)).delay(&cfg),
            Some(Duration::from_millis(7))
        );
        assert_eq!(ThinkPolicy::Fixed(Duration::ZERO).delay(&cfg), None);
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("none".parse(), Ok(ThinkPolicy::None));
        assert_eq!("Balanced".parse(), Ok(ThinkPolicy::Balanced));
        assert_eq!(
            "15".parse(),
            Ok(ThinkPolicy::Fixed(Duration::from_millis(15)))
        );
        assert_eq!("0".parse(), Ok(ThinkPolicy::None));
        assert!("soon".parse::<ThinkPolicy>().is_err());
    }
}
