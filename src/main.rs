//! # BazarBuddy demo
//!
//! Boots the marketplace and walks one order from cart to rating:
//! 1. Two suppliers register and list tomatoes and rice.
//! 2. A vendor buys 10 kg tomatoes and 25 kg rice and checks out through
//!    the active group order.
//! 3. Both suppliers confirm, ship and deliver their share.
//! 4. The vendor rates the order.

use bazar_buddy::cart_actor::CheckoutRequest;
use bazar_buddy::clock::SystemClock;
use bazar_buddy::config::MarketConfig;
use bazar_buddy::error::MarketError;
use bazar_buddy::lifecycle::{setup_tracing, MarketSystem};
use bazar_buddy::model::{
    Caller, GroupId, GroupOrder, GroupStatus, PartitionStatus, ProductCreate, SupplierCreate,
    SupplierId,
};
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut config = MarketConfig::from_env().map_err(|e| e.to_string())?;
    config.groups = vec![GroupOrder {
        id: GroupId(1),
        name: "Mumbai Street Vendors Group".into(),
        member_count: 12,
        total_amount: 25_000,
        discount_percent: 8,
        status: GroupStatus::Active,
    }];
    let clock = Arc::new(SystemClock);
    let system = MarketSystem::start(config, clock.clone());

    let result = run_demo(&system, &clock)
        .instrument(tracing::info_span!("demo"))
        .await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Demo failed");
    }

    system.shutdown().await?;
    result.map_err(|e| e.to_string())
}

async fn run_demo(system: &MarketSystem, clock: &SystemClock) -> Result<(), MarketError> {
    use bazar_buddy::clock::Clock;

    let market = &system.market;
    let fresh_farms = Caller::supplier(101);
    let golden_grains = Caller::supplier(102);
    let vendor = Caller::vendor(1);

    // Suppliers and their catalog
    let span = tracing::info_span!("catalog");
    let (tomatoes, rice) = async {
        market
            .register_supplier(
                &fresh_farms,
                SupplierCreate {
                    business_name: "Fresh Farms".into(),
                    location: "Vashi, Navi Mumbai".into(),
                    categories: vec!["vegetables".into()],
                },
            )
            .await?;
        market
            .register_supplier(
                &golden_grains,
                SupplierCreate {
                    business_name: "Golden Grains".into(),
                    location: "APMC Market, Vashi".into(),
                    categories: vec!["grains".into(), "pulses".into()],
                },
            )
            .await?;

        let tomatoes = market
            .create_product(
                &fresh_farms,
                ProductCreate {
                    supplier_id: SupplierId(101),
                    name: "Tomatoes".into(),
                    category: "vegetables".into(),
                    unit_price: 40,
                    unit: "kg".into(),
                    stock: 500,
                    description: "Farm fresh, Nashik".into(),
                },
            )
            .await?;
        let rice = market
            .create_product(
                &golden_grains,
                ProductCreate {
                    supplier_id: SupplierId(102),
                    name: "Basmati Rice".into(),
                    category: "grains".into(),
                    unit_price: 80,
                    unit: "kg".into(),
                    stock: 200,
                    description: String::new(),
                },
            )
            .await?;
        info!(tomatoes = %tomatoes.id, rice = %rice.id, "Catalog ready");
        Ok::<_, MarketError>((tomatoes, rice))
    }
    .instrument(span)
    .await?;

    // Cart and checkout
    market.add_to_cart(&vendor, tomatoes.id, 10).await?;
    market.add_to_cart(&vendor, rice.id, 25).await?;
    let cart = market.view_cart(&vendor).await?;
    info!(lines = cart.lines.len(), subtotal = cart.subtotal()?, "Cart filled");

    let group = market.list_active_groups().into_iter().next();
    let order = market
        .checkout(
            &vendor,
            CheckoutRequest {
                delivery_date: clock.today() + Duration::days(1),
                delivery_address: "Stall 4, Dadar Market, Mumbai".into(),
                group_id: group.map(|g| g.id),
            },
        )
        .await?;
    info!(
        order_id = %order.id,
        subtotal = order.pricing.subtotal,
        discount = order.pricing.group_discount,
        total = order.pricing.total,
        status = ?order.status(),
        "Checked out"
    );

    // Fulfilment, one supplier at a time
    for supplier in [&fresh_farms, &golden_grains] {
        market.confirm_order_partition(supplier, order.id).await?;
        market
            .advance_order_partition(supplier, order.id, PartitionStatus::Shipped)
            .await?;
        let updated = market
            .advance_order_partition(supplier, order.id, PartitionStatus::Delivered)
            .await?;
        info!(supplier = supplier.user_id, status = ?updated.status(), "Partition delivered");
    }

    let rated = market
        .rate_order(&vendor, order.id, 5, Some("Fresh and on time".into()))
        .await?;
    info!(order_id = %rated.id, stars = rated.rating.as_ref().map(|r| r.stars), "Order rated");

    let dashboard = market.supplier_dashboard(&fresh_farms).await?;
    info!(
        revenue = dashboard.revenue,
        pending = dashboard.pending_orders,
        rating = ?dashboard.average_rating,
        "Fresh Farms dashboard"
    );
    Ok(())
}
