//! Orders and the per-supplier status machine.
//!
//! An order spans every supplier in the cart it was placed from. Each
//! supplier's share (its *partition*) moves through
//!
//! ```text
//! Pending ──confirm──► Confirmed ──advance──► Shipped ──advance──► Delivered
//!    │
//!    └──reject(reason)──► Rejected
//! ```
//!
//! `Rejected` and `Delivered` are terminal. The order-level status is never
//! stored; [`Order::status`] derives it from the partitions.

use crate::error::MarketError;
use crate::model::{CartLineItem, GroupId, Rupees, SupplierId, VendorId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Status of one supplier's partition of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Rejected,
}

impl PartitionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }

    /// The only state `advance` may move to from `self`.
    fn shipping_successor(self) -> Option<Self> {
        match self {
            Self::Confirmed => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Share of the fulfilment path completed, for tracking displays.
    pub fn progress(self) -> f64 {
        match self {
            Self::Pending | Self::Rejected => 0.0,
            Self::Confirmed => 1.0 / 3.0,
            Self::Shipped => 2.0 / 3.0,
            Self::Delivered => 1.0,
        }
    }
}

impl Display for PartitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Vendor-facing status of a whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Rejected,
    /// Partitions disagree; read the per-supplier breakdown.
    Mixed,
}

impl OrderStatus {
    /// All partitions equal gives that status, anything else is `Mixed`.
    /// An empty set cannot occur for a stored order and reads as `Pending`.
    pub fn derive<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = PartitionStatus>,
    {
        let mut statuses = statuses.into_iter();
        let Some(first) = statuses.next() else {
            return Self::Pending;
        };
        if statuses.any(|s| s != first) {
            return Self::Mixed;
        }
        match first {
            PartitionStatus::Pending => Self::Pending,
            PartitionStatus::Confirmed => Self::Confirmed,
            PartitionStatus::Shipped => Self::Shipped,
            PartitionStatus::Delivered => Self::Delivered,
            PartitionStatus::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: PartitionStatus,
    pub at: DateTime<Utc>,
}

/// One supplier's share of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub status: PartitionStatus,
    pub rejection_reason: Option<String>,
    /// Every status the partition has held, oldest first.
    pub history: Vec<StatusChange>,
}

impl Partition {
    fn new(supplier_id: SupplierId, supplier_name: String, at: DateTime<Utc>) -> Self {
        Self {
            supplier_id,
            supplier_name,
            status: PartitionStatus::Pending,
            rejection_reason: None,
            history: vec![StatusChange {
                status: PartitionStatus::Pending,
                at,
            }],
        }
    }

    fn set(&mut self, status: PartitionStatus, at: DateTime<Utc>) {
        self.status = status;
        self.history.push(StatusChange { status, at });
    }

    fn illegal(&self, attempted: &str) -> MarketError {
        MarketError::InvalidState(format!(
            "cannot {attempted} partition of {}: it is {}",
            self.supplier_id, self.status
        ))
    }

    pub fn confirm(&mut self, at: DateTime<Utc>) -> Result<(), MarketError> {
        if self.status != PartitionStatus::Pending {
            return Err(self.illegal("confirm"));
        }
        self.set(PartitionStatus::Confirmed, at);
        Ok(())
    }

    pub fn reject(&mut self, reason: &str, at: DateTime<Utc>) -> Result<(), MarketError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(MarketError::validation("a rejection reason is required"));
        }
        if self.status != PartitionStatus::Pending {
            return Err(self.illegal("reject"));
        }
        self.rejection_reason = Some(reason.to_string());
        self.set(PartitionStatus::Rejected, at);
        Ok(())
    }

    /// Moves one step along confirmed → shipped → delivered. `next` must be
    /// exactly that step.
    pub fn advance(&mut self, next: PartitionStatus, at: DateTime<Utc>) -> Result<(), MarketError> {
        match self.status.shipping_successor() {
            Some(expected) if expected == next => {
                self.set(next, at);
                Ok(())
            }
            _ => Err(self.illegal(&format!("advance to {next}"))),
        }
    }
}

/// Price breakdown fixed at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPricing {
    pub subtotal: Rupees,
    pub delivery_fee: Rupees,
    pub group_discount: Rupees,
    pub total: Rupees,
    pub group_id: Option<GroupId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRating {
    /// 1..=5
    pub stars: u8,
    pub review: Option<String>,
    pub rated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub vendor_id: VendorId,
    /// Cart lines as they were at checkout.
    pub items: Vec<CartLineItem>,
    /// One per supplier, in order of first appearance in `items`.
    pub partitions: Vec<Partition>,
    pub delivery_date: NaiveDate,
    pub delivery_address: String,
    pub pricing: OrderPricing,
    pub created_at: DateTime<Utc>,
    pub rating: Option<OrderRating>,
}

/// Payload for creating a new order, produced by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub vendor_id: VendorId,
    pub items: Vec<CartLineItem>,
    pub delivery_date: NaiveDate,
    pub delivery_address: String,
    pub pricing: OrderPricing,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds the order and its pending partitions, checking the order
    /// invariants (non-empty, delivery not before creation, address present).
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, MarketError> {
        if params.items.is_empty() {
            return Err(MarketError::validation("an order needs at least one item"));
        }
        if params.delivery_date < params.created_at.date_naive() {
            return Err(MarketError::validation(format!(
                "delivery date {} is before the order date",
                params.delivery_date
            )));
        }
        if params.delivery_address.trim().is_empty() {
            return Err(MarketError::validation("a delivery address is required"));
        }

        let mut partitions: Vec<Partition> = Vec::new();
        for item in &params.items {
            if !partitions.iter().any(|p| p.supplier_id == item.supplier_id) {
                partitions.push(Partition::new(
                    item.supplier_id,
                    item.supplier_name.clone(),
                    params.created_at,
                ));
            }
        }

        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            items: params.items,
            partitions,
            delivery_date: params.delivery_date,
            delivery_address: params.delivery_address.trim().to_string(),
            pricing: params.pricing,
            created_at: params.created_at,
            rating: None,
        })
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus::derive(self.partitions.iter().map(|p| p.status))
    }

    pub fn partition(&self, supplier_id: SupplierId) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.supplier_id == supplier_id)
    }

    pub fn partition_mut(&mut self, supplier_id: SupplierId) -> Result<&mut Partition, MarketError> {
        let order_id = self.id;
        self.partitions
            .iter_mut()
            .find(|p| p.supplier_id == supplier_id)
            .ok_or_else(|| MarketError::NotFound(format!("{supplier_id} has no part in {order_id}")))
    }

    pub fn items_from(&self, supplier_id: SupplierId) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter().filter(move |i| i.supplier_id == supplier_id)
    }

    /// Value of one supplier's lines. Bounded by the order subtotal, which
    /// was checked at checkout.
    pub fn supplier_subtotal(&self, supplier_id: SupplierId) -> Rupees {
        self.items_from(supplier_id)
            .map(|line| line.line_total().unwrap_or(Rupees::MAX))
            .fold(0, Rupees::saturating_add)
    }

    pub fn supplier_ids(&self) -> impl Iterator<Item = SupplierId> + '_ {
        self.partitions.iter().map(|p| p.supplier_id)
    }
}
