//! Runtime core: philosophers, monitor and orchestration.
//!
//! The public API from this module is [`Supervisor`] (built through
//! [`SupervisorBuilder`]), the [`Interrupter`] handle and the [`Outcome`] /
//! [`Summary`] a run produces.
//!
//! Internal modules:
//! - [`philosopher`]: one task per seat, eat / sleep / think cycle;
//! - [`monitor`]: starvation and quota watcher;
//! - [`hold`]: cancellable timed wait shared by both;
//! - [`supervisor`]: spawns tasks, handles stop requests, joins with grace;
//! - [`shutdown`]: OS signals and the interrupter handle.

mod builder;
mod hold;
mod monitor;
mod outcome;
mod philosopher;
mod shutdown;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use monitor::Monitor;
pub use outcome::{Outcome, Summary};
pub use philosopher::Philosopher;
pub use shutdown::Interrupter;
pub use supervisor::Supervisor;
