//! # Cart Client
//!
//! One cart per vendor, addressed by [`VendorId`]. A vendor who never touched
//! their cart reads back an empty one.
use crate::cart_actor::{CartAction, CartActionResult, CheckoutRequest};
use crate::error::MarketError;
use crate::model::{Cart, CartLineItem, OrderId, ProductId, VendorId};
use tracing::{debug, instrument};

crate::market_client!(
    /// Client for interacting with the Cart actor.
    CartClient,
    Cart,
    cart
);

impl CartClient {
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        vendor_id: VendorId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLineItem, MarketError> {
        debug!("Sending request");
        let action = CartAction::AddItem {
            product_id,
            quantity,
        };
        match self.inner.perform_action(vendor_id, action).await? {
            CartActionResult::AddItem(line) => Ok(line),
            _ => unreachable!("AddItem action must return AddItem result"),
        }
    }

    /// Returns the new quantity, or `None` if the line was removed.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        vendor_id: VendorId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Option<u32>, MarketError> {
        debug!("Sending request");
        let action = CartAction::UpdateQuantity {
            product_id,
            quantity,
        };
        match self.inner.perform_action(vendor_id, action).await? {
            CartActionResult::UpdateQuantity(quantity) => Ok(quantity),
            _ => unreachable!("UpdateQuantity action must return UpdateQuantity result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        vendor_id: VendorId,
        product_id: ProductId,
    ) -> Result<bool, MarketError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(vendor_id, CartAction::RemoveItem(product_id))
            .await?
        {
            CartActionResult::RemoveItem(removed) => Ok(removed),
            _ => unreachable!("RemoveItem action must return RemoveItem result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn view_cart(&self, vendor_id: VendorId) -> Result<Cart, MarketError> {
        debug!("Sending request");
        Ok(self
            .get_cart(vendor_id)
            .await?
            .unwrap_or_else(|| Cart::new(vendor_id)))
    }

    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        vendor_id: VendorId,
        request: CheckoutRequest,
    ) -> Result<OrderId, MarketError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(vendor_id, CartAction::Checkout(request))
            .await?
        {
            CartActionResult::Checkout(order_id) => Ok(order_id),
            _ => unreachable!("Checkout action must return Checkout result"),
        }
    }
}
