//! Vendor carts and checkout.

mod actions;
pub mod checkout;
pub mod entity;

pub use actions::*;
pub use checkout::CheckoutRequest;
pub use entity::CartContext;

use crate::clients::CartClient;
use crate::model::Cart;
use actor_framework::ResourceActor;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
