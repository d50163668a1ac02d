//! Marketplace data types. Entities stored by an actor implement
//! [`ActorEntity`](actor_framework::ActorEntity) in their actor module.

pub mod cart;
pub mod group;
pub mod order;
pub mod product;
pub mod supplier;
pub mod user;
pub mod views;

pub use cart::*;
pub use group::*;
pub use order::*;
pub use product::*;
pub use supplier::*;
pub use user::*;
pub use views::*;
