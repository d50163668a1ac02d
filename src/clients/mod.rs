//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient),
//! one per actor. All of them report [`MarketError`](crate::error::MarketError).

pub mod macros;

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod supplier_client;

pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
pub use supplier_client::*;
