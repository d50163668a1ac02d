//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Every vendor implicitly owns one cart keyed by their [`VendorId`]; it is
//! materialised empty the first time an action touches it. Cart actions reach
//! into the catalog (to snapshot a product), the group directory and the
//! order store (on checkout) through [`CartContext`].

use super::actions::{CartAction, CartActionResult};
use super::checkout;
use crate::clients::{OrderClient, ProductClient};
use crate::clock::SharedClock;
use crate::error::MarketError;
use crate::model::{Cart, GroupDirectory, Rupees, VendorId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::info;

/// Dependencies of the cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub groups: GroupDirectory,
    pub clock: SharedClock,
    pub delivery_fee: Rupees,
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = VendorId;
    type Create = ();
    type Update = Infallible;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = MarketError;

    fn from_create_params(id: VendorId, _params: ()) -> Result<Self, MarketError> {
        Ok(Cart::new(id))
    }

    fn vacant(id: &VendorId) -> Option<Self> {
        Some(Cart::new(*id))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &CartContext) -> Result<(), MarketError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, MarketError> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => {
                let product = ctx.products.require_product(product_id).await?;
                let line = self.add_item(&product, quantity)?;
                Ok(CartActionResult::AddItem(line.clone()))
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self
                .update_quantity(product_id, quantity)
                .map(CartActionResult::UpdateQuantity),
            CartAction::RemoveItem(product_id) => {
                Ok(CartActionResult::RemoveItem(self.remove_item(product_id)))
            }
            CartAction::Checkout(request) => {
                let group = request
                    .group_id
                    .map(|id| ctx.groups.require(id))
                    .transpose()?;
                let create =
                    checkout::build_order(self, request, group, ctx.clock.now(), ctx.delivery_fee)?;
                let total = create.pricing.total;
                let order_id = ctx.orders.place_order(create).await?;
                self.clear();
                info!(vendor_id = %self.vendor_id, %order_id, total, "Checked out");
                Ok(CartActionResult::Checkout(order_id))
            }
        }
    }
}
