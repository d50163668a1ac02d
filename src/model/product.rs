//! Catalog entries listed by suppliers.
//!
//! [`Product`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::product_actor::entity`].

use crate::error::MarketError;
use crate::model::SupplierId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Whole rupees.
pub type Rupees = u64;

/// Highest unit price a listing may carry (one crore).
pub const MAX_UNIT_PRICE: Rupees = 10_000_000;

/// A unit price must lie in `1..=MAX_UNIT_PRICE`.
pub fn check_unit_price(price: Rupees) -> Result<(), MarketError> {
    if price == 0 {
        return Err(MarketError::validation("unit price must be at least 1"));
    }
    if price > MAX_UNIT_PRICE {
        return Err(MarketError::validation(format!(
            "unit price must be at most {MAX_UNIT_PRICE}"
        )));
    }
    Ok(())
}

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub supplier_id: SupplierId,
    /// Copied from the supplier profile when the product is listed.
    pub supplier_name: String,
    pub name: String,
    pub category: String,
    pub unit_price: Rupees,
    /// Selling unit, e.g. "kg" or "dozen".
    pub unit: String,
    pub stock: u32,
    pub description: String,
}

/// Payload for listing a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub supplier_id: SupplierId,
    pub name: String,
    pub category: String,
    pub unit_price: Rupees,
    pub unit: String,
    pub stock: u32,
    pub description: String,
}

impl ProductCreate {
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.name.trim().is_empty() {
            return Err(MarketError::validation("product name is required"));
        }
        if self.unit.trim().is_empty() {
            return Err(MarketError::validation("product unit is required"));
        }
        check_unit_price(self.unit_price)
    }
}

/// Changes a supplier may make to an existing listing. `requested_by` must
/// own the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub requested_by: SupplierId,
    pub unit_price: Option<Rupees>,
    pub stock: Option<u32>,
    pub description: Option<String>,
}

impl Product {
    /// Creates a new Product instance. `supplier_name` starts empty and is
    /// filled from the supplier directory during creation.
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            supplier_id: params.supplier_id,
            supplier_name: String::new(),
            name: params.name.trim().to_string(),
            category: params.category.trim().to_string(),
            unit_price: params.unit_price,
            unit: params.unit.trim().to_string(),
            stock: params.stock,
            description: params.description,
        }
    }
}
