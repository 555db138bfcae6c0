//! # The `Subscribe` trait.
//!
//! Implement it to observe lifecycle events (a death, the quota, shutdown, each
//! seat starting and stopping). Each subscriber gets its own worker task and its
//! own bounded queue inside the [`SubscriberSet`](crate::SubscriberSet). A slow
//! handler only delays itself. When its queue is full, further events for it are
//! dropped and a `SubscriberOverflow` event goes out instead.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use symposium::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct Deaths(AtomicUsize);
//!
//! #[async_trait::async_trait]
//! impl Subscribe for Deaths {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::StarvationDetected {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "deaths" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Handler for lifecycle events.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Called once per event, in publication order.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow and panic reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Events that may wait for this subscriber before new ones are dropped.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
