//! Read-side projections of orders for vendors and suppliers.

use crate::model::{
    CartLineItem, Order, OrderId, PartitionStatus, Rupees, StatusChange, Supplier, SupplierId,
    VendorId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One order as a single supplier sees it: only their lines and their
/// partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrderView {
    pub order_id: OrderId,
    pub vendor_id: VendorId,
    pub items: Vec<CartLineItem>,
    pub subtotal: Rupees,
    pub status: PartitionStatus,
    pub rejection_reason: Option<String>,
    pub history: Vec<StatusChange>,
    pub delivery_date: NaiveDate,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
}

impl SupplierOrderView {
    /// `None` when the supplier has no partition in `order`.
    pub fn project(order: &Order, supplier_id: SupplierId) -> Option<Self> {
        let partition = order.partition(supplier_id)?;
        Some(Self {
            order_id: order.id,
            vendor_id: order.vendor_id,
            items: order.items_from(supplier_id).cloned().collect(),
            subtotal: order.supplier_subtotal(supplier_id),
            status: partition.status,
            rejection_reason: partition.rejection_reason.clone(),
            history: partition.history.clone(),
            delivery_date: order.delivery_date,
            delivery_address: order.delivery_address.clone(),
            created_at: order.created_at,
        })
    }
}

/// Result of `list_orders`, shaped by the caller's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", content = "orders", rename_all = "lowercase")]
pub enum OrderListing {
    Vendor(Vec<Order>),
    Supplier(Vec<SupplierOrderView>),
}

impl OrderListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Vendor(orders) => orders.len(),
            Self::Supplier(views) => views.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierDashboard {
    pub supplier_id: SupplierId,
    pub business_name: String,
    pub verified: bool,
    /// Partitions still waiting for a confirm or reject.
    pub pending_orders: usize,
    /// Supplier subtotals of confirmed, shipped and delivered partitions.
    pub revenue: Rupees,
    pub average_rating: Option<f64>,
    pub rating_count: usize,
    pub product_count: usize,
}

impl SupplierDashboard {
    pub fn compute(supplier: &Supplier, orders: &[Order], product_count: usize) -> Self {
        let mut pending_orders = 0;
        let mut revenue: Rupees = 0;
        for order in orders {
            let Some(partition) = order.partition(supplier.id) else {
                continue;
            };
            match partition.status {
                PartitionStatus::Pending => pending_orders += 1,
                PartitionStatus::Confirmed
                | PartitionStatus::Shipped
                | PartitionStatus::Delivered => {
                    revenue = order.supplier_subtotal(supplier.id).saturating_add(revenue)
                }
                PartitionStatus::Rejected => {}
            }
        }
        Self {
            supplier_id: supplier.id,
            business_name: supplier.business_name.clone(),
            verified: supplier.is_verified(),
            pending_orders,
            revenue,
            average_rating: supplier.average_rating(),
            rating_count: supplier.ratings.len(),
            product_count,
        }
    }
}
