//! # Order Client
//!
//! Placing orders, per-supplier status changes and ratings. Every status
//! change replies with the updated order.
use crate::error::MarketError;
use crate::model::{Order, OrderCreate, OrderId, PartitionStatus, SupplierId, VendorId};
use crate::order_actor::OrderAction;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::{debug, instrument};

crate::market_client!(
    /// Client for interacting with the Order actor.
    OrderClient,
    Order,
    order
);

fn newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|o| Reverse((o.created_at, o.id.0)));
}

impl OrderClient {
    #[instrument(skip(self, order), fields(vendor_id = %order.vendor_id, items = order.items.len()))]
    pub async fn place_order(&self, order: OrderCreate) -> Result<OrderId, MarketError> {
        debug!(?order, "place_order called");
        Ok(self.inner.create(order).await?)
    }

    #[instrument(skip(self))]
    pub async fn confirm(
        &self,
        id: OrderId,
        supplier_id: SupplierId,
        at: DateTime<Utc>,
    ) -> Result<Order, MarketError> {
        debug!("Sending request");
        let action = OrderAction::Confirm { supplier_id, at };
        Ok(self.inner.perform_action(id, action).await?)
    }

    #[instrument(skip(self))]
    pub async fn reject(
        &self,
        id: OrderId,
        supplier_id: SupplierId,
        reason: String,
        at: DateTime<Utc>,
    ) -> Result<Order, MarketError> {
        debug!("Sending request");
        let action = OrderAction::Reject {
            supplier_id,
            reason,
            at,
        };
        Ok(self.inner.perform_action(id, action).await?)
    }

    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: OrderId,
        supplier_id: SupplierId,
        to: PartitionStatus,
        at: DateTime<Utc>,
    ) -> Result<Order, MarketError> {
        debug!("Sending request");
        let action = OrderAction::Advance {
            supplier_id,
            to,
            at,
        };
        Ok(self.inner.perform_action(id, action).await?)
    }

    #[instrument(skip(self, review))]
    pub async fn rate(
        &self,
        id: OrderId,
        vendor_id: VendorId,
        stars: u8,
        review: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<Order, MarketError> {
        debug!("Sending request");
        let action = OrderAction::Rate {
            vendor_id,
            stars,
            review,
            at,
        };
        Ok(self.inner.perform_action(id, action).await?)
    }

    /// A vendor's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_of_vendor(&self, vendor_id: VendorId) -> Result<Vec<Order>, MarketError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .list(move |o: &Order| o.vendor_id == vendor_id)
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }

    /// Orders with a partition for `supplier_id`, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<Order>, MarketError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .list(move |o: &Order| o.partition(supplier_id).is_some())
            .await?;
        newest_first(&mut orders);
        Ok(orders)
    }
}
