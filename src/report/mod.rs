//! Status reporting: the only producer of standard output.
//!
//! ## Contents
//! - [`Status`], [`StatusLine`] what a philosopher did and the printed line
//! - [`Reporter`] serialized writer with the post-death cutoff
//! - [`Sink`], [`StdoutSink`], [`MemorySink`] line destinations
//!
//! Status lines are written synchronously by the task that observed the change;
//! they never travel through the lifecycle [`Bus`](crate::events::Bus), which is
//! asynchronous and would lose the ordering against the termination flags.

mod reporter;
mod sink;
mod status;

pub use reporter::Reporter;
pub use sink::{MemorySink, Sink, StdoutSink};
pub use status::{Status, StatusLine};
