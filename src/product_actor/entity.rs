//! [`ActorEntity`] implementation for [`Product`].
//!
//! A product can only be listed by a registered supplier; `on_create` looks
//! the supplier up and copies its business name onto the listing. Products
//! have no custom actions.

use crate::clients::SupplierClient;
use crate::error::MarketError;
use crate::model::{check_unit_price, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = SupplierClient;
    type Error = MarketError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, MarketError> {
        params.validate()?;
        Ok(Self::new(id, params))
    }

    async fn on_create(&mut self, suppliers: &SupplierClient) -> Result<(), MarketError> {
        let supplier = suppliers.require_supplier(self.supplier_id).await?;
        self.supplier_name = supplier.business_name;
        Ok(())
    }

    /// Only the listing supplier may change it; a new price is bounds-checked.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _suppliers: &SupplierClient,
    ) -> Result<(), MarketError> {
        if update.requested_by != self.supplier_id {
            return Err(MarketError::Unauthorized(format!(
                "{} does not own {}",
                update.requested_by, self.id
            )));
        }
        if let Some(price) = update.unit_price {
            check_unit_price(price)?;
            self.unit_price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _suppliers: &SupplierClient,
    ) -> Result<(), MarketError> {
        match action {}
    }
}
