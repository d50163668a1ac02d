use actor_framework::mock::MockClient;
use bazar_buddy::cart_actor::CartContext;
use bazar_buddy::clients::{OrderClient, ProductClient};
use bazar_buddy::clock::FixedClock;
use bazar_buddy::error::MarketError;
use bazar_buddy::model::{
    GroupDirectory, Order, Product, ProductId, Rupees, SupplierId, VendorId,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn product(id: u32, name: &str, unit_price: Rupees, stock: u32) -> Product {
    Product {
        id: ProductId(id),
        supplier_id: SupplierId(1),
        supplier_name: "Fresh Farms".into(),
        name: name.into(),
        category: "spices".into(),
        unit_price,
        unit: "g".into(),
        stock,
        description: String::new(),
    }
}

/// Real Cart actor with mocked catalog and order store. A line whose total
/// does not fit is refused and the actor keeps serving every vendor.
#[tokio::test]
async fn oversized_line_is_refused_without_stopping_the_actor() {
    let saffron = product(1, "Saffron", Rupees::MAX / 2, 10);
    let pepper = product(2, "Pepper", 600, 50);

    let mut product_mock = MockClient::<Product>::new();
    product_mock.expect_get(ProductId(1)).return_ok(Some(saffron.clone()));
    product_mock.expect_get(ProductId(1)).return_ok(Some(saffron));
    product_mock.expect_get(ProductId(2)).return_ok(Some(pepper));
    let order_mock = MockClient::<Order>::new();

    let (cart_actor, carts) = bazar_buddy::cart_actor::new(8);
    let handle = tokio::spawn(cart_actor.run(CartContext {
        products: ProductClient::new(product_mock.client()),
        orders: OrderClient::new(order_mock.client()),
        groups: GroupDirectory::default(),
        clock: Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap(),
        )),
        delivery_fee: 50,
    }));

    let vendor = VendorId(7);
    assert!(matches!(
        carts.add_item(vendor, ProductId(1), 3).await,
        Err(MarketError::Validation(_))
    ));
    assert!(carts.view_cart(vendor).await.unwrap().is_empty());

    let line = carts.add_item(vendor, ProductId(1), 1).await.unwrap();
    assert_eq!(line.quantity, 1);

    let other = carts.add_item(VendorId(8), ProductId(2), 5).await.unwrap();
    assert_eq!(other.line_total(), Some(3000));
    assert_eq!(
        carts.view_cart(vendor).await.unwrap().subtotal(),
        Ok(Rupees::MAX / 2)
    );

    product_mock.verify();
    order_mock.verify();

    drop(carts);
    handle.await.unwrap();
}
