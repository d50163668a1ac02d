//! # Actor Framework
//!
//! Building blocks for a type-safe, in-process resource store: each resource
//! type is owned by one [`ResourceActor`] task that serves CRUD, custom
//! actions and filtered listing over a channel, and is reached through a
//! cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain state and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop, id allocation, rollback
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Guarantees
//!
//! - Requests for one resource type are processed one at a time, so a hook
//!   never races another hook on the same store.
//! - A failing `on_update` or `handle_action` leaves the entity exactly as it
//!   was before the request.
//! - Entity errors come back typed as [`FrameworkError::Entity`].
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Stall { id: u32, open: bool }
//! #[derive(Debug)] struct StallCreate;
//! #[derive(Debug)] enum StallAction { Open }
//! #[derive(Debug, thiserror::Error)]
//! #[error("stall already open")]
//! struct AlreadyOpen;
//!
//! #[async_trait]
//! impl ActorEntity for Stall {
//!     type Id = u32;
//!     type Create = StallCreate;
//!     type Update = ();
//!     type Action = StallAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = AlreadyOpen;
//!
//!     fn from_create_params(id: u32, _: StallCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, open: false })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: StallAction, _: &()) -> Result<(), Self::Error> {
//!         if self.open { return Err(AlreadyOpen); }
//!         self.open = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Stall>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(StallCreate).await.unwrap();
//!     client.perform_action(id, StallAction::Open).await.unwrap();
//!     assert!(client.perform_action(id, StallAction::Open).await.is_err());
//!     assert!(client.get(id).await.unwrap().unwrap().open);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted
//! expectations, which isolates an actor from the actors in its context.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, Reply, ResourceRequest, Response};
