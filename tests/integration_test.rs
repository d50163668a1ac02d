use bazar_buddy::cart_actor::CheckoutRequest;
use bazar_buddy::clock::{Clock, FixedClock};
use bazar_buddy::config::MarketConfig;
use bazar_buddy::error::MarketError;
use bazar_buddy::facade::Marketplace;
use bazar_buddy::lifecycle::MarketSystem;
use bazar_buddy::model::{
    Caller, GroupId, GroupOrder, GroupStatus, KycKind, OrderListing, OrderStatus,
    PartitionStatus, Product, ProductCreate, ProductUpdate, Role, SupplierCreate, SupplierId,
    MAX_UNIT_PRICE,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

const FRESH_FARMS: Caller = Caller {
    user_id: 1,
    role: Role::Supplier,
};
const GOLDEN_GRAINS: Caller = Caller {
    user_id: 2,
    role: Role::Supplier,
};
const VENDOR: Caller = Caller {
    user_id: 7,
    role: Role::Vendor,
};

struct Fixture {
    system: MarketSystem,
    clock: Arc<FixedClock>,
    tomatoes: Product,
    rice: Product,
}

impl Fixture {
    fn market(&self) -> &Marketplace {
        &self.system.market
    }

    fn tomorrow(&self) -> NaiveDate {
        self.clock.today() + Duration::days(1)
    }

    fn request(&self) -> CheckoutRequest {
        CheckoutRequest {
            delivery_date: self.tomorrow(),
            delivery_address: "Stall 4, Dadar Market".into(),
            group_id: None,
        }
    }

    /// 10 kg tomatoes (Fresh Farms) and 25 kg rice (Golden Grains).
    async fn fill_cart(&self) {
        self.market()
            .add_to_cart(&VENDOR, self.tomatoes.id, 10)
            .await
            .expect("add tomatoes");
        self.market()
            .add_to_cart(&VENDOR, self.rice.id, 25)
            .await
            .expect("add rice");
    }
}

async fn register(market: &Marketplace, caller: &Caller, name: &str, category: &str) {
    market
        .register_supplier(
            caller,
            SupplierCreate {
                business_name: name.into(),
                location: "Vashi, Navi Mumbai".into(),
                categories: vec![category.into()],
            },
        )
        .await
        .expect("register supplier");
}

fn listing(name: &str, category: &str, unit_price: u64, stock: u32) -> ProductCreate {
    ProductCreate {
        // Overwritten with the caller's id.
        supplier_id: SupplierId(0),
        name: name.into(),
        category: category.into(),
        unit_price,
        unit: "kg".into(),
        stock,
        description: String::new(),
    }
}

fn group(id: u32, discount_percent: u8, status: GroupStatus) -> GroupOrder {
    GroupOrder {
        id: GroupId(id),
        name: format!("Dadar Vendors {id}"),
        member_count: 12,
        total_amount: 25_000,
        discount_percent,
        status,
    }
}

async fn setup() -> Fixture {
    setup_with(MarketConfig::default()).await
}

async fn setup_with(config: MarketConfig) -> Fixture {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap(),
    ));
    let system = MarketSystem::start(config, clock.clone());
    let market = &system.market;

    register(market, &FRESH_FARMS, "Fresh Farms", "vegetables").await;
    register(market, &GOLDEN_GRAINS, "Golden Grains", "grains").await;
    let tomatoes = market
        .create_product(&FRESH_FARMS, listing("Tomatoes", "vegetables", 40, 500))
        .await
        .expect("list tomatoes");
    let rice = market
        .create_product(&GOLDEN_GRAINS, listing("Rice", "grains", 80, 200))
        .await
        .expect("list rice");

    Fixture {
        system,
        clock,
        tomatoes,
        rice,
    }
}

/// Full end-to-end run with all real actors: cart, checkout, split order.
#[tokio::test]
async fn tomatoes_and_rice_become_one_order_with_two_partitions() {
    let fx = setup().await;
    assert_eq!(fx.tomatoes.supplier_name, "Fresh Farms");
    fx.fill_cart().await;

    let cart = fx.market().view_cart(&VENDOR).await.unwrap();
    assert_eq!(cart.subtotal(), Ok(2400));

    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();
    assert_eq!(order.pricing.subtotal, 2400);
    assert_eq!(order.pricing.delivery_fee, 50);
    assert_eq!(order.pricing.total, 2450);
    assert_eq!(order.status(), OrderStatus::Pending);
    let suppliers: Vec<_> = order.supplier_ids().collect();
    assert_eq!(suppliers, vec![SupplierId(1), SupplierId(2)]);
    assert!(order
        .partitions
        .iter()
        .all(|p| p.status == PartitionStatus::Pending));

    // The cart is emptied by a successful checkout.
    assert!(fx.market().view_cart(&VENDOR).await.unwrap().is_empty());

    fx.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_checkout_leaves_cart_and_creates_no_order() {
    let fx = setup().await;

    // Nothing in the cart yet.
    assert!(matches!(
        fx.market().checkout(&VENDOR, fx.request()).await,
        Err(MarketError::Validation(_))
    ));

    fx.fill_cart().await;
    let before = fx.market().view_cart(&VENDOR).await.unwrap();

    let mut past = fx.request();
    past.delivery_date = fx.clock.today() - Duration::days(1);
    assert!(matches!(
        fx.market().checkout(&VENDOR, past).await,
        Err(MarketError::Validation(_))
    ));

    let mut blank = fx.request();
    blank.delivery_address = "  ".into();
    assert!(matches!(
        fx.market().checkout(&VENDOR, blank).await,
        Err(MarketError::Validation(_))
    ));

    assert_eq!(fx.market().view_cart(&VENDOR).await.unwrap(), before);
    assert!(fx
        .market()
        .list_vendor_orders(&VENDOR, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn group_discount_comes_from_the_directory() {
    let fx = setup_with(MarketConfig {
        groups: vec![
            group(1, 8, GroupStatus::Active),
            group(2, 100, GroupStatus::Closed),
        ],
        ..MarketConfig::default()
    })
    .await;
    fx.fill_cart().await;

    let active: Vec<_> = fx
        .market()
        .list_active_groups()
        .into_iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(active, vec![GroupId(1)]);

    let mut unknown = fx.request();
    unknown.group_id = Some(GroupId(999));
    assert!(matches!(
        fx.market().checkout(&VENDOR, unknown).await,
        Err(MarketError::NotFound(_))
    ));

    let mut closed = fx.request();
    closed.group_id = Some(GroupId(2));
    assert!(matches!(
        fx.market().checkout(&VENDOR, closed).await,
        Err(MarketError::Validation(_))
    ));
    assert_eq!(fx.market().view_cart(&VENDOR).await.unwrap().lines.len(), 2);

    let mut request = fx.request();
    request.group_id = Some(GroupId(1));
    let order = fx.market().checkout(&VENDOR, request).await.unwrap();
    assert_eq!(order.pricing.group_discount, 192);
    assert_eq!(order.pricing.total, 2400 + 50 - 192);
    assert_eq!(order.pricing.group_id, Some(GroupId(1)));
}

#[tokio::test]
async fn cart_quantity_is_clamped_and_zero_removes() {
    let fx = setup().await;
    let market = fx.market();
    market.add_to_cart(&VENDOR, fx.rice.id, 25).await.unwrap();

    for q in [1, 57, 200] {
        assert_eq!(
            market.update_cart_quantity(&VENDOR, fx.rice.id, q).await,
            Ok(Some(q))
        );
    }
    assert_eq!(
        market.update_cart_quantity(&VENDOR, fx.rice.id, 500).await,
        Ok(Some(200))
    );
    assert_eq!(
        market.update_cart_quantity(&VENDOR, fx.rice.id, 0).await,
        Ok(None)
    );
    assert!(market.view_cart(&VENDOR).await.unwrap().is_empty());

    assert!(matches!(
        market.update_cart_quantity(&VENDOR, fx.rice.id, 3).await,
        Err(MarketError::NotFound(_))
    ));
    // Removing an absent line is not an error.
    assert_eq!(market.remove_from_cart(&VENDOR, fx.rice.id).await, Ok(false));
}

#[tokio::test]
async fn add_to_cart_checks_stock_and_catalog() {
    let fx = setup().await;
    let market = fx.market();

    assert!(matches!(
        market.add_to_cart(&VENDOR, fx.rice.id, 201).await,
        Err(MarketError::Validation(_))
    ));
    assert!(matches!(
        market.add_to_cart(&VENDOR, fx.rice.id, 0).await,
        Err(MarketError::Validation(_))
    ));
    assert!(matches!(
        market
            .add_to_cart(&VENDOR, bazar_buddy::model::ProductId(99), 1)
            .await,
        Err(MarketError::NotFound(_))
    ));

    market.add_to_cart(&VENDOR, fx.rice.id, 150).await.unwrap();
    let line = market.add_to_cart(&VENDOR, fx.rice.id, 100).await.unwrap();
    assert_eq!(line.quantity, 200);
}

#[tokio::test]
async fn merged_line_follows_lowered_stock() {
    let fx = setup().await;
    let market = fx.market();

    market.add_to_cart(&VENDOR, fx.rice.id, 150).await.unwrap();
    market
        .update_product(
            &GOLDEN_GRAINS,
            fx.rice.id,
            ProductUpdate {
                requested_by: SupplierId(0),
                unit_price: Some(75),
                stock: Some(160),
                description: None,
            },
        )
        .await
        .unwrap();

    let line = market.add_to_cart(&VENDOR, fx.rice.id, 20).await.unwrap();
    assert_eq!(line.quantity, 160);
    assert_eq!(line.unit_price, 75);
}

#[tokio::test]
async fn oversized_prices_are_refused_and_carts_keep_working() {
    let fx = setup().await;
    let market = fx.market();

    assert!(matches!(
        market
            .create_product(&FRESH_FARMS, listing("Saffron", "spices", u64::MAX / 2, 10))
            .await,
        Err(MarketError::Validation(_))
    ));
    assert!(matches!(
        market
            .update_product(
                &FRESH_FARMS,
                fx.tomatoes.id,
                ProductUpdate {
                    requested_by: SupplierId(0),
                    unit_price: Some(MAX_UNIT_PRICE + 1),
                    stock: None,
                    description: None,
                },
            )
            .await,
        Err(MarketError::Validation(_))
    ));

    let saffron = market
        .create_product(&FRESH_FARMS, listing("Saffron", "spices", MAX_UNIT_PRICE, 10))
        .await
        .unwrap();
    market.add_to_cart(&VENDOR, saffron.id, 10).await.unwrap();
    let order = market.checkout(&VENDOR, fx.request()).await.unwrap();
    assert_eq!(order.pricing.total, MAX_UNIT_PRICE * 10 + 50);
    assert_eq!(fx.market().get_product(fx.tomatoes.id).await.unwrap().unit_price, 40);
}

#[tokio::test]
async fn rejecting_one_supplier_leaves_the_other_pending() {
    let fx = setup().await;
    fx.fill_cart().await;
    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();

    let updated = fx
        .market()
        .reject_order_partition(&FRESH_FARMS, order.id, "Out of stock".into())
        .await
        .unwrap();
    assert_eq!(updated.status(), OrderStatus::Mixed);
    let a = updated.partition(SupplierId(1)).unwrap();
    assert_eq!(a.status, PartitionStatus::Rejected);
    assert_eq!(a.rejection_reason.as_deref(), Some("Out of stock"));
    assert_eq!(
        updated.partition(SupplierId(2)).unwrap().status,
        PartitionStatus::Pending
    );

    // Vendor sees both partitions.
    let OrderListing::Vendor(orders) = fx.market().list_orders(&VENDOR).await.unwrap() else {
        panic!("vendor listing expected");
    };
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].partitions.len(), 2);

    // Each supplier only sees their own share.
    let views = fx
        .market()
        .list_supplier_orders(&GOLDEN_GRAINS, None)
        .await
        .unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].status, PartitionStatus::Pending);
    assert_eq!(views[0].subtotal, 2000);
    assert!(views[0].items.iter().all(|i| i.supplier_id == SupplierId(2)));

    let rejected = fx
        .market()
        .list_supplier_orders(&FRESH_FARMS, Some(PartitionStatus::Rejected))
        .await
        .unwrap();
    assert_eq!(rejected[0].rejection_reason.as_deref(), Some("Out of stock"));
    assert!(fx
        .market()
        .list_supplier_orders(&FRESH_FARMS, Some(PartitionStatus::Pending))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn illegal_transitions_are_invalid_state() {
    let fx = setup().await;
    fx.fill_cart().await;
    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();
    let market = fx.market();

    assert!(matches!(
        market
            .advance_order_partition(&FRESH_FARMS, order.id, PartitionStatus::Shipped)
            .await,
        Err(MarketError::InvalidState(_))
    ));

    market
        .confirm_order_partition(&FRESH_FARMS, order.id)
        .await
        .unwrap();
    assert!(matches!(
        market
            .reject_order_partition(&FRESH_FARMS, order.id, "changed my mind".into())
            .await,
        Err(MarketError::InvalidState(_))
    ));
    assert!(matches!(
        market
            .advance_order_partition(&FRESH_FARMS, order.id, PartitionStatus::Delivered)
            .await,
        Err(MarketError::InvalidState(_))
    ));
    assert!(matches!(
        market
            .reject_order_partition(&GOLDEN_GRAINS, order.id, " ".into())
            .await,
        Err(MarketError::Validation(_))
    ));

    // Unchanged by the failures above.
    let stored = market.order_details(&VENDOR, order.id).await.unwrap();
    let a = stored.partition(SupplierId(1)).unwrap();
    assert_eq!(a.status, PartitionStatus::Confirmed);
    assert_eq!(a.history.len(), 2);
    assert_eq!(
        stored.partition(SupplierId(2)).unwrap().status,
        PartitionStatus::Pending
    );
}

#[tokio::test]
async fn unknown_order_or_partition_is_not_found() {
    let fx = setup().await;
    fx.fill_cart().await;
    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();

    let outsider = Caller::supplier(3);
    assert!(matches!(
        fx.market().confirm_order_partition(&outsider, order.id).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        fx.market()
            .confirm_order_partition(&FRESH_FARMS, bazar_buddy::model::OrderId(42))
            .await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        fx.market()
            .order_details(&Caller::vendor(8), order.id)
            .await,
        Err(MarketError::NotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_confirms_by_both_suppliers_both_land() {
    let fx = setup().await;
    fx.fill_cart().await;
    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();

    let id = order.id;
    let market_a = fx.market().clone();
    let market_b = fx.market().clone();
    let a = tokio::spawn(async move { market_a.confirm_order_partition(&FRESH_FARMS, id).await });
    let b = tokio::spawn(async move { market_b.confirm_order_partition(&GOLDEN_GRAINS, id).await });
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let stored = fx.market().order_details(&VENDOR, order.id).await.unwrap();
    assert_eq!(stored.status(), OrderStatus::Confirmed);
}

#[tokio::test]
async fn rating_is_once_and_only_after_delivery() {
    let fx = setup().await;
    fx.fill_cart().await;
    let order = fx.market().checkout(&VENDOR, fx.request()).await.unwrap();
    let market = fx.market();

    assert!(matches!(
        market.rate_order(&VENDOR, order.id, 5, None).await,
        Err(MarketError::Validation(_))
    ));

    for supplier in [&FRESH_FARMS, &GOLDEN_GRAINS] {
        market.confirm_order_partition(supplier, order.id).await.unwrap();
        fx.clock.advance(Duration::hours(2));
        market
            .advance_order_partition(supplier, order.id, PartitionStatus::Shipped)
            .await
            .unwrap();
        market
            .advance_order_partition(supplier, order.id, PartitionStatus::Delivered)
            .await
            .unwrap();
    }

    assert!(matches!(
        market.rate_order(&VENDOR, order.id, 6, None).await,
        Err(MarketError::Validation(_))
    ));
    assert!(matches!(
        market.rate_order(&Caller::vendor(8), order.id, 4, None).await,
        Err(MarketError::Unauthorized(_))
    ));

    let rated = market
        .rate_order(&VENDOR, order.id, 5, Some(" Great tomatoes ".into()))
        .await
        .unwrap();
    let rating = rated.rating.unwrap();
    assert_eq!(rating.stars, 5);
    assert_eq!(rating.review.as_deref(), Some("Great tomatoes"));

    assert!(matches!(
        market.rate_order(&VENDOR, order.id, 1, None).await,
        Err(MarketError::InvalidState(_))
    ));

    // Both suppliers' means reflect only the first rating.
    for id in [SupplierId(1), SupplierId(2)] {
        let supplier = market.supplier_profile(id).await.unwrap();
        assert_eq!(supplier.ratings.len(), 1);
        assert_eq!(supplier.average_rating(), Some(5.0));
    }

    let dashboard = market.supplier_dashboard(&GOLDEN_GRAINS).await.unwrap();
    assert_eq!(dashboard.revenue, 2000);
    assert_eq!(dashboard.pending_orders, 0);
    assert_eq!(dashboard.product_count, 1);
    assert_eq!(dashboard.average_rating, Some(5.0));
}

#[tokio::test]
async fn roles_are_enforced() {
    let fx = setup().await;
    let market = fx.market();

    assert!(matches!(
        market.add_to_cart(&FRESH_FARMS, fx.rice.id, 1).await,
        Err(MarketError::Unauthorized(_))
    ));
    assert!(matches!(
        market
            .confirm_order_partition(&VENDOR, bazar_buddy::model::OrderId(1))
            .await,
        Err(MarketError::Unauthorized(_))
    ));
    assert!(matches!(
        market
            .review_kyc(&FRESH_FARMS, SupplierId(1), KycKind::IdentityProof, true, None)
            .await,
        Err(MarketError::Unauthorized(_))
    ));
    assert!(matches!(
        market.list_orders(&Caller::admin(99)).await,
        Err(MarketError::Unauthorized(_))
    ));

    // Only the listing supplier may edit a product.
    let update = ProductUpdate {
        requested_by: SupplierId(0),
        unit_price: Some(35),
        stock: None,
        description: None,
    };
    assert!(matches!(
        market
            .update_product(&GOLDEN_GRAINS, fx.tomatoes.id, update.clone())
            .await,
        Err(MarketError::Unauthorized(_))
    ));
    let updated = market
        .update_product(&FRESH_FARMS, fx.tomatoes.id, update)
        .await
        .unwrap();
    assert_eq!(updated.unit_price, 35);
    assert!(matches!(
        market.remove_product(&GOLDEN_GRAINS, fx.tomatoes.id).await,
        Err(MarketError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn suppliers_register_once_and_list_only_when_registered() {
    let fx = setup().await;
    let market = fx.market();

    assert!(matches!(
        market
            .register_supplier(
                &FRESH_FARMS,
                SupplierCreate {
                    business_name: "Fresh Farms Again".into(),
                    location: String::new(),
                    categories: vec![],
                },
            )
            .await,
        Err(MarketError::InvalidState(_))
    ));

    let unregistered = Caller::supplier(3);
    assert!(matches!(
        market
            .create_product(&unregistered, listing("Onions", "vegetables", 30, 100))
            .await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        market
            .create_product(&FRESH_FARMS, listing("Onions", "vegetables", 0, 100))
            .await,
        Err(MarketError::Validation(_))
    ));

    let products = market.list_products(Some(SupplierId(1))).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(market.list_products(None).await.unwrap().len(), 2);

    market
        .remove_product(&FRESH_FARMS, fx.tomatoes.id)
        .await
        .unwrap();
    assert!(market.list_products(Some(SupplierId(1))).await.unwrap().is_empty());
}

#[tokio::test]
async fn kyc_review_and_supplier_search() {
    let fx = setup().await;
    let market = fx.market();
    let admin = Caller::admin(99);

    for kind in [
        KycKind::BusinessLicense,
        KycKind::IdentityProof,
        KycKind::AddressProof,
    ] {
        market
            .submit_kyc(&FRESH_FARMS, kind, format!("{kind:?}.pdf"))
            .await
            .unwrap();
        market
            .review_kyc(&admin, SupplierId(1), kind, true, None)
            .await
            .unwrap();
    }
    assert!(matches!(
        market
            .submit_kyc(&FRESH_FARMS, KycKind::AddressProof, "new.pdf".into())
            .await,
        Err(MarketError::InvalidState(_))
    ));

    let profile = market.supplier_profile(SupplierId(1)).await.unwrap();
    assert!(profile.is_verified());
    assert!(market.supplier_dashboard(&FRESH_FARMS).await.unwrap().verified);

    let found = market
        .search_suppliers(Some("farms".into()), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, SupplierId(1));

    let grains = market
        .search_suppliers(None, Some("Grains".into()))
        .await
        .unwrap();
    assert_eq!(grains.len(), 1);
    assert_eq!(grains[0].business_name, "Golden Grains");

    let all = market.search_suppliers(Some("vashi".into()), None).await.unwrap();
    assert_eq!(all.len(), 2);
}
