//! Lifecycle events and the bus they travel on.
//!
//! [`Event`] / [`EventKind`] describe what happened; [`Bus`] carries events from the
//! supervisor, the philosophers, the monitor and the subscriber workers to the
//! supervisor's single listener, which fans them out to subscribers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
