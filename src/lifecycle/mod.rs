//! # System Lifecycle
//!
//! Starting, wiring and stopping the marketplace actors.
//!
//! Actors are created first without dependencies, then each `run()` receives
//! the clients it needs as its context. Because the dependency graph is
//! acyclic, shutdown needs no special message: dropping the facade closes the
//! cart and order channels, which drops their context clients, which closes
//! the product and supplier channels in turn.

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use tracing::*;
