//! Supplier directory: profiles, KYC review and rating ledgers.

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::SupplierClient;
use crate::model::Supplier;
use actor_framework::ResourceActor;

/// Creates a new Supplier actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Supplier>, SupplierClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SupplierClient::new(generic_client))
}
