//! # Product Client
//!
//! Catalog access for suppliers (listing, editing) and for the cart
//! (snapshotting a product into a line).
use crate::error::MarketError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, SupplierId};
use tracing::{debug, instrument};

crate::market_client!(
    /// Client for interacting with the Product actor.
    ProductClient,
    Product,
    product
);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, MarketError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, MarketError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Catalog listing ordered by id, optionally restricted to one supplier.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        supplier_id: Option<SupplierId>,
    ) -> Result<Vec<Product>, MarketError> {
        debug!("Sending request");
        let mut products = self
            .inner
            .list(move |p: &Product| supplier_id.map_or(true, |s| p.supplier_id == s))
            .await?;
        products.sort_by_key(|p| p.id.0);
        Ok(products)
    }
}
