//! # Status events printed for philosophers.

use std::fmt;

/// Observable state change of one philosopher.
///
/// The `fork` carried by [`Status::TookFork`] is the fork index in the ring; it is
/// not printed, but it lets in-memory sinks check the acquisition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// One fork was acquired.
    TookFork {
        /// Ring index of the acquired fork.
        fork: usize,
    },
    /// Both forks are held and the meal has started.
    Eating,
    /// Forks were released, sleeping started.
    Sleeping,
    /// Sleeping finished.
    Thinking,
    /// Starvation deadline reached.
    Died,
}

impl Status {
    /// Text printed after the philosopher id.
    pub fn label(&self) -> &'static str {
        match self {
            Status::TookFork { .. } => "has taken a fork",
            Status::Eating => "is eating",
            Status::Sleeping => "is sleeping",
            Status::Thinking => "is thinking",
            Status::Died => "died",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of simulation output: `<elapsed_ms> <philosopher> <status>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    /// Milliseconds since the simulation started.
    pub at_ms: u64,
    /// Philosopher id (1-based).
    pub philosopher: usize,
    /// What happened.
    pub status: Status,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.at_ms, self.philosopher, self.status)
    }
}
