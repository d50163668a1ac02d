//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are created by checkout and never updated or deleted through the
//! store; all changes go through [`OrderAction`]. The supplier client in the
//! context is used to copy ratings into each supplier's ledger.

use super::actions::OrderAction;
use crate::clients::SupplierClient;
use crate::error::MarketError;
use crate::model::{Order, OrderCreate, OrderId, OrderRating, OrderStatus, RatingEntry};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = SupplierClient;
    type Error = MarketError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, MarketError> {
        Order::new(id, params)
    }

    async fn on_update(&mut self, update: Infallible, _: &SupplierClient) -> Result<(), MarketError> {
        match update {}
    }

    async fn on_delete(&self, _: &SupplierClient) -> Result<(), MarketError> {
        Err(MarketError::invalid_state(format!("{} cannot be deleted", self.id)))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        suppliers: &SupplierClient,
    ) -> Result<Order, MarketError> {
        match action {
            OrderAction::Confirm { supplier_id, at } => {
                self.partition_mut(supplier_id)?.confirm(at)?;
            }
            OrderAction::Reject {
                supplier_id,
                reason,
                at,
            } => {
                self.partition_mut(supplier_id)?.reject(&reason, at)?;
            }
            OrderAction::Advance {
                supplier_id,
                to,
                at,
            } => {
                self.partition_mut(supplier_id)?.advance(to, at)?;
            }
            OrderAction::Rate {
                vendor_id,
                stars,
                review,
                at,
            } => {
                if vendor_id != self.vendor_id {
                    return Err(MarketError::Unauthorized(format!(
                        "{vendor_id} did not place {}",
                        self.id
                    )));
                }
                if !(1..=5).contains(&stars) {
                    return Err(MarketError::validation("stars must be between 1 and 5"));
                }
                if self.status() != OrderStatus::Delivered {
                    return Err(MarketError::validation(format!(
                        "{} is not delivered yet",
                        self.id
                    )));
                }
                if self.rating.is_some() {
                    return Err(MarketError::invalid_state(format!(
                        "{} is already rated",
                        self.id
                    )));
                }

                let review = review
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty());
                // Ledgers are keyed by order id, so a retry after a partial
                // failure here does not count twice.
                for supplier_id in self.supplier_ids().collect::<Vec<_>>() {
                    let entry = RatingEntry {
                        order_id: self.id,
                        vendor_id,
                        stars,
                        review: review.clone(),
                        recorded_at: at,
                    };
                    let added = suppliers.record_rating(supplier_id, entry).await?;
                    debug!(order_id = %self.id, %supplier_id, added, "Rating recorded");
                }
                self.rating = Some(OrderRating {
                    stars,
                    review,
                    rated_at: at,
                });
            }
        }
        Ok(self.clone())
    }
}
