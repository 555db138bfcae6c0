//! Error types used by the simulation runtime and its coordinator.
//!
//! This module defines three error enums:
//!
//! - [`ConfigError`]: the configuration cannot describe a simulation.
//! - [`TableError`]: the shared table could not be constructed.
//! - [`RuntimeError`]: the supervisor could not bring the simulation to a clean end.
//!
//! Each type provides `as_label` for logs/metrics. Starvation is **not** an error:
//! it is one of the terminal outcomes reported by [`Summary`](crate::Summary).

use std::time::Duration;
use thiserror::Error;

/// # Errors produced while validating a [`Config`](crate::Config).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A count or duration that must be strictly positive is zero.
    #[error("{field} must be a positive integer")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A value does not fit into the signed 32-bit range accepted on the command line.
    #[error("{field} cannot be higher than {max} (got {value})", max = i32::MAX)]
    TooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use symposium::ConfigError;
    ///
    /// let err = ConfigError::NonPositive { field: "philosophers" };
    /// assert_eq!(err.as_label(), "config_non_positive");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::NonPositive { .. } => "config_non_positive",
            ConfigError::TooLarge { .. } => "config_too_large",
        }
    }
}

/// # Errors produced while building the shared [`Table`](crate::Table).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TableError {
    /// Storage for forks or philosopher records could not be reserved.
    #[error("failed to allocate {count} {what}")]
    Allocation {
        /// What was being allocated (`"forks"`, `"records"`).
        what: &'static str,
        /// Number of elements requested.
        count: usize,
    },

    /// The configuration was rejected before any lock was created.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TableError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TableError::Allocation { .. } => "table_allocation",
            TableError::Config(e) => e.as_label(),
        }
    }
}

/// # Errors produced by the supervisor while driving a simulation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A philosopher or the monitor panicked instead of returning.
    #[error("task {task} panicked")]
    TaskPanicked {
        /// Name of the task (`"philosopher-3"`, `"monitor"`).
        task: String,
    },

    /// Tasks were still running when the grace period ran out and were aborted.
    #[error("shutdown timeout {grace:?} exceeded; {remaining} task(s) aborted")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of tasks that did not stop in time.
        remaining: usize,
    },

    /// The table could not be built.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use symposium::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), remaining: 2 };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::TaskPanicked { .. } => "runtime_task_panicked",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
            RuntimeError::Table(e) => e.as_label(),
        }
    }
}
