//! The vendor's shopping cart.
//!
//! All cart rules live here as plain methods; the cart actor only adds
//! catalog lookups and checkout around them.

use crate::error::MarketError;
use crate::model::{Product, ProductId, Rupees, SupplierId, VendorId};
use serde::{Deserialize, Serialize};

/// One product in the cart, with the catalog details captured when it was
/// added. The line id is the product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub unit_price: Rupees,
    /// Always within `1..=max_stock`.
    pub quantity: u32,
    pub unit: String,
    pub max_stock: u32,
}

impl CartLineItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            supplier_id: product.supplier_id,
            supplier_name: product.supplier_name.clone(),
            unit_price: product.unit_price,
            quantity,
            unit: product.unit.clone(),
            max_stock: product.stock,
        }
    }

    /// `None` when the total does not fit in [`Rupees`].
    pub fn line_total(&self) -> Option<Rupees> {
        self.unit_price.checked_mul(Rupees::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub vendor_id: VendorId,
    pub lines: Vec<CartLineItem>,
}

impl Cart {
    pub fn new(vendor_id: VendorId) -> Self {
        Self {
            vendor_id,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same product. A merged line takes the product's current name, price
    /// and stock, and its quantity is capped at that stock.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<&CartLineItem, MarketError> {
        if quantity < 1 {
            return Err(MarketError::validation("quantity must be at least 1"));
        }
        if quantity > product.stock {
            return Err(MarketError::validation(format!(
                "only {} {} of {} in stock",
                product.stock, product.unit, product.name
            )));
        }

        let previous = self.lines.clone();
        let index = match self.lines.iter().position(|l| l.product_id == product.id) {
            Some(i) => {
                let merged = self.lines[i].quantity.saturating_add(quantity).min(product.stock);
                self.lines[i] = CartLineItem::from_product(product, merged);
                i
            }
            None => {
                self.lines.push(CartLineItem::from_product(product, quantity));
                self.lines.len() - 1
            }
        };
        if let Err(e) = self.subtotal() {
            self.lines = previous;
            return Err(e);
        }
        Ok(&self.lines[index])
    }

    /// Sets a line's quantity, clamped to its stock limit. Zero removes the
    /// line. Returns the resulting quantity, or `None` when the line was removed.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Option<u32>, MarketError> {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return Err(MarketError::NotFound(format!("cart line {product_id}")));
        };
        if quantity < 1 {
            self.lines.remove(index);
            return Ok(None);
        }
        let line = &mut self.lines[index];
        let previous = line.quantity;
        line.quantity = quantity.min(line.max_stock);
        let stored = line.quantity;
        if let Err(e) = self.subtotal() {
            self.lines[index].quantity = previous;
            return Err(e);
        }
        Ok(Some(stored))
    }

    /// Removes a line; returns whether one was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Sum of all line totals. Fails when the sum does not fit in [`Rupees`].
    pub fn subtotal(&self) -> Result<Rupees, MarketError> {
        self.lines
            .iter()
            .try_fold(0, |acc: Rupees, line| line.line_total()?.checked_add(acc))
            .ok_or_else(|| MarketError::validation("cart total is too large"))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
