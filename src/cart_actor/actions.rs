//! Custom actions for the Cart actor.

use super::checkout::CheckoutRequest;
use crate::model::{CartLineItem, OrderId, ProductId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Looks the product up in the catalog and adds it to the cart.
    AddItem { product_id: ProductId, quantity: u32 },
    /// Zero removes the line.
    UpdateQuantity { product_id: ProductId, quantity: u32 },
    RemoveItem(ProductId),
    /// Turns the cart into an order and empties it.
    Checkout(CheckoutRequest),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    AddItem(CartLineItem),
    /// New quantity, or `None` if the line was removed.
    UpdateQuantity(Option<u32>),
    /// Whether a line was present.
    RemoveItem(bool),
    Checkout(OrderId),
}
