//! # How a simulation ended.

use std::fmt;

/// Terminal condition of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A philosopher went `time_to_die` without starting a meal.
    Starved {
        /// Seat of the philosopher that died.
        philosopher: usize,
        /// Timestamp printed on the "died" line.
        at_ms: u64,
    },
    /// Every philosopher ate at least `must_eat` times.
    QuotaMet {
        /// When the monitor observed the quota.
        at_ms: u64,
    },
    /// The run was stopped from outside (signal or [`Interrupter`](crate::Interrupter)).
    Interrupted {
        /// When the monitor noticed the interrupt.
        at_ms: u64,
    },
}

impl Outcome {
    /// Milliseconds since start at which the run ended.
    pub fn at_ms(&self) -> u64 {
        match *self {
            Outcome::Starved { at_ms, .. }
            | Outcome::QuotaMet { at_ms }
            | Outcome::Interrupted { at_ms } => at_ms,
        }
    }

    /// True if a philosopher died.
    pub fn is_starved(&self) -> bool {
        matches!(self, Outcome::Starved { .. })
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Outcome::Starved { .. } => "starved",
            Outcome::QuotaMet { .. } => "quota_met",
            Outcome::Interrupted { .. } => "interrupted",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Starved { philosopher, at_ms } => {
                write!(f, "philosopher {philosopher} starved at {at_ms} ms")
            }
            Outcome::QuotaMet { at_ms } => write!(f, "quota met at {at_ms} ms"),
            Outcome::Interrupted { at_ms } => write!(f, "interrupted at {at_ms} ms"),
        }
    }
}

/// Result of a completed [`Supervisor::run`](crate::Supervisor::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Why the run ended.
    pub outcome: Outcome,
    /// Milliseconds since start once every task had stopped.
    pub elapsed_ms: u64,
    /// Meals eaten per philosopher, in seat order.
    pub meals: Vec<u32>,
}

impl Summary {
    /// Smallest meal count across the table.
    pub fn min_meals(&self) -> Option<u32> {
        self.meals.iter().copied().min()
    }

    /// Total meals eaten.
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().map(|&m| u64::from(m)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_aggregates_meals() {
        let s = Summary {
            outcome: Outcome::QuotaMet { at_ms: 2800 },
            elapsed_ms: 2801,
            meals: vec![7, 8, 7],
        };
        assert_eq!(s.min_meals(), Some(7));
        assert_eq!(s.total_meals(), 22);
        assert_eq!(s.outcome.as_label(), "quota_met");
        assert_eq!(s.outcome.to_string(), "quota met at 2800 ms");
    }

    #[test]
    fn starved_outcome_carries_the_seat() {
        let o = Outcome::Starved {
            philosopher: 1,
            at_ms: 800,
        };
        assert!(o.is_starved());
        assert_eq!(o.at_ms(), 800);
        assert_eq!(o.to_string(), "philosopher 1 starved at 800 ms");
    }
}
