//! # Marketplace Facade
//!
//! The surface the API layer calls. Every operation takes the authenticated
//! [`Caller`] explicitly and checks its role before touching any actor:
//!
//! | Operations | Role |
//! |------------|------|
//! | cart, checkout, vendor order list, rating | `Vendor` |
//! | partition status, products, profile, KYC upload, dashboard | `Supplier` (acts on own id) |
//! | KYC review | `Admin` |
//! | supplier profile/search, catalog listing, active groups | any |
//!
//! Supplier ids are the supplier's user id, and a vendor's cart is keyed by
//! the vendor's user id.

use crate::cart_actor::CheckoutRequest;
use crate::clients::{CartClient, OrderClient, ProductClient, SupplierClient};
use crate::clock::SharedClock;
use crate::error::MarketError;
use crate::model::{
    Caller, Cart, CartLineItem, GroupDirectory, GroupOrder, KycDocument, KycKind, Order,
    OrderId, OrderListing, OrderStatus, PartitionStatus, Product, ProductCreate, ProductId,
    ProductUpdate, Role, Supplier, SupplierCreate, SupplierDashboard, SupplierId,
    SupplierOrderView, SupplierUpdate,
};
use actor_framework::ActorClient;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct Marketplace {
    carts: CartClient,
    orders: OrderClient,
    products: ProductClient,
    suppliers: SupplierClient,
    groups: GroupDirectory,
    clock: SharedClock,
}

impl Marketplace {
    pub fn new(
        carts: CartClient,
        orders: OrderClient,
        products: ProductClient,
        suppliers: SupplierClient,
        groups: GroupDirectory,
        clock: SharedClock,
    ) -> Self {
        Self {
            carts,
            orders,
            products,
            suppliers,
            groups,
            clock,
        }
    }

    // --- Cart ---

    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        caller: &Caller,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLineItem, MarketError> {
        let vendor_id = caller.as_vendor()?;
        self.carts.add_item(vendor_id, product_id, quantity).await
    }

    /// A quantity of zero removes the line. Returns the stored quantity.
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(
        &self,
        caller: &Caller,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Option<u32>, MarketError> {
        let vendor_id = caller.as_vendor()?;
        self.carts
            .update_quantity(vendor_id, product_id, quantity)
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        caller: &Caller,
        product_id: ProductId,
    ) -> Result<bool, MarketError> {
        let vendor_id = caller.as_vendor()?;
        self.carts.remove_item(vendor_id, product_id).await
    }

    #[instrument(skip(self))]
    pub async fn view_cart(&self, caller: &Caller) -> Result<Cart, MarketError> {
        let vendor_id = caller.as_vendor()?;
        self.carts.view_cart(vendor_id).await
    }

    /// Group orders a vendor can select at checkout.
    pub fn list_active_groups(&self) -> Vec<GroupOrder> {
        self.groups.active()
    }

    /// Places one order for everything in the caller's cart and empties it.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        caller: &Caller,
        request: CheckoutRequest,
    ) -> Result<Order, MarketError> {
        let vendor_id = caller.as_vendor()?;
        let order_id = self.carts.checkout(vendor_id, request).await?;
        let order = self.orders.require_order(order_id).await?;
        info!(%order_id, total = order.pricing.total, suppliers = order.partitions.len(), "Order placed");
        Ok(order)
    }

    // --- Orders ---

    /// Vendors get their orders; suppliers get their share of every order
    /// they are part of.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, caller: &Caller) -> Result<OrderListing, MarketError> {
        match caller.role {
            Role::Vendor => Ok(OrderListing::Vendor(
                self.list_vendor_orders(caller, None).await?,
            )),
            Role::Supplier => Ok(OrderListing::Supplier(
                self.list_supplier_orders(caller, None).await?,
            )),
            Role::Admin => Err(MarketError::Unauthorized(
                "order lists are per vendor or supplier".into(),
            )),
        }
    }

    /// Newest first, optionally only orders whose aggregate status is `status`.
    #[instrument(skip(self))]
    pub async fn list_vendor_orders(
        &self,
        caller: &Caller,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, MarketError> {
        let vendor_id = caller.as_vendor()?;
        let mut orders = self.orders.orders_of_vendor(vendor_id).await?;
        if let Some(status) = status {
            orders.retain(|o| o.status() == status);
        }
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_supplier_orders(
        &self,
        caller: &Caller,
        status: Option<PartitionStatus>,
    ) -> Result<Vec<SupplierOrderView>, MarketError> {
        let supplier_id = caller.as_supplier()?;
        let orders = self.orders.orders_for_supplier(supplier_id).await?;
        Ok(orders
            .iter()
            .filter_map(|o| SupplierOrderView::project(o, supplier_id))
            .filter(|v| status.map_or(true, |s| v.status == s))
            .collect())
    }

    /// One of the caller's own orders, with the per-supplier breakdown.
    #[instrument(skip(self))]
    pub async fn order_details(&self, caller: &Caller, order_id: OrderId) -> Result<Order, MarketError> {
        let vendor_id = caller.as_vendor()?;
        let order = self.orders.require_order(order_id).await?;
        if order.vendor_id != vendor_id {
            // Same answer as a missing order.
            return Err(MarketError::NotFound(order_id.to_string()));
        }
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn confirm_order_partition(
        &self,
        caller: &Caller,
        order_id: OrderId,
    ) -> Result<Order, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.orders
            .confirm(order_id, supplier_id, self.clock.now())
            .await
    }

    #[instrument(skip(self))]
    pub async fn reject_order_partition(
        &self,
        caller: &Caller,
        order_id: OrderId,
        reason: String,
    ) -> Result<Order, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.orders
            .reject(order_id, supplier_id, reason, self.clock.now())
            .await
    }

    #[instrument(skip(self))]
    pub async fn advance_order_partition(
        &self,
        caller: &Caller,
        order_id: OrderId,
        to: PartitionStatus,
    ) -> Result<Order, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.orders
            .advance(order_id, supplier_id, to, self.clock.now())
            .await
    }

    #[instrument(skip(self, review))]
    pub async fn rate_order(
        &self,
        caller: &Caller,
        order_id: OrderId,
        stars: u8,
        review: Option<String>,
    ) -> Result<Order, MarketError> {
        let vendor_id = caller.as_vendor()?;
        self.orders
            .rate(order_id, vendor_id, stars, review, self.clock.now())
            .await
    }

    // --- Suppliers ---

    #[instrument(skip(self))]
    pub async fn register_supplier(
        &self,
        caller: &Caller,
        profile: SupplierCreate,
    ) -> Result<Supplier, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.suppliers.register(supplier_id, profile).await?;
        self.suppliers.require_supplier(supplier_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_supplier_profile(
        &self,
        caller: &Caller,
        update: SupplierUpdate,
    ) -> Result<Supplier, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.suppliers.update_profile(supplier_id, update).await
    }

    #[instrument(skip(self))]
    pub async fn submit_kyc(
        &self,
        caller: &Caller,
        kind: KycKind,
        file_name: String,
    ) -> Result<KycDocument, MarketError> {
        let supplier_id = caller.as_supplier()?;
        self.suppliers
            .submit_kyc(supplier_id, kind, file_name, self.clock.now())
            .await
    }

    #[instrument(skip(self))]
    pub async fn review_kyc(
        &self,
        caller: &Caller,
        supplier_id: SupplierId,
        kind: KycKind,
        approve: bool,
        note: Option<String>,
    ) -> Result<KycDocument, MarketError> {
        caller.require_admin()?;
        self.suppliers
            .review_kyc(supplier_id, kind, approve, note)
            .await
    }

    #[instrument(skip(self))]
    pub async fn supplier_profile(&self, supplier_id: SupplierId) -> Result<Supplier, MarketError> {
        self.suppliers.require_supplier(supplier_id).await
    }

    #[instrument(skip(self))]
    pub async fn search_suppliers(
        &self,
        text: Option<String>,
        category: Option<String>,
    ) -> Result<Vec<Supplier>, MarketError> {
        self.suppliers.search(text, category).await
    }

    #[instrument(skip(self))]
    pub async fn supplier_dashboard(&self, caller: &Caller) -> Result<SupplierDashboard, MarketError> {
        let supplier_id = caller.as_supplier()?;
        let supplier = self.suppliers.require_supplier(supplier_id).await?;
        let orders = self.orders.orders_for_supplier(supplier_id).await?;
        let products = self.products.list_products(Some(supplier_id)).await?;
        Ok(SupplierDashboard::compute(&supplier, &orders, products.len()))
    }

    // --- Catalog ---

    /// Lists a product under the caller's supplier id, whatever
    /// `params.supplier_id` says.
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        caller: &Caller,
        mut params: ProductCreate,
    ) -> Result<Product, MarketError> {
        params.supplier_id = caller.as_supplier()?;
        let product_id = self.products.create_product(params).await?;
        self.products.require_product(product_id).await
    }

    /// `update.requested_by` is replaced with the caller's id.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        caller: &Caller,
        product_id: ProductId,
        mut update: ProductUpdate,
    ) -> Result<Product, MarketError> {
        update.requested_by = caller.as_supplier()?;
        self.products.update_product(product_id, update).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, caller: &Caller, product_id: ProductId) -> Result<(), MarketError> {
        let supplier_id = caller.as_supplier()?;
        let product = self.products.require_product(product_id).await?;
        if product.supplier_id != supplier_id {
            return Err(MarketError::Unauthorized(format!(
                "{supplier_id} does not own {product_id}"
            )));
        }
        self.products.remove(product_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        supplier_id: Option<SupplierId>,
    ) -> Result<Vec<Product>, MarketError> {
        self.products.list_products(supplier_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, MarketError> {
        self.products.require_product(product_id).await
    }
}
