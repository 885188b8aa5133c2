//! Runtime orchestration and lifecycle management.
//!
//! - [`OrderSystem`] creates the actors, picks the order store, wires the order service
//!   with its dependencies and shuts everything down in order.
//! - [`setup_tracing`] initializes logging.
//!
//! ## Graceful Shutdown
//!
//! Actors stop when the last client of their channel is dropped. The controller also
//! listens on a `CancellationToken`: [`OrderSystem::shutdown`] cancels it, so it stops
//! after its queued and in-flight commands even while
//! [`OrderClient`](crate::clients::OrderClient) clones are still around. The controller
//! owns the service, so the order store and product clients go with it and the remaining
//! actors wind down after.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use tracing::*;
