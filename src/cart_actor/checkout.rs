//! Order aggregation: turns a cart into the payload of a new order.
//!
//! Everything here is checked before anything is written. The cart entity
//! resolves the requested group, sends the resulting [`OrderCreate`] to the
//! order store and clears itself only once the order exists.

use crate::error::MarketError;
use crate::model::{Cart, GroupId, GroupOrder, OrderCreate, OrderPricing, Rupees};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub delivery_date: NaiveDate,
    pub delivery_address: String,
    /// Group order to buy through, if any. Must exist and still be active.
    pub group_id: Option<GroupId>,
}

/// `total = subtotal + delivery_fee - discount`, the discount taken on the
/// full subtotal.
pub fn price(
    subtotal: Rupees,
    delivery_fee: Rupees,
    group: Option<&GroupOrder>,
) -> Result<OrderPricing, MarketError> {
    let group_discount = group.map_or(0, |g| g.discount_on(subtotal));
    let gross = subtotal
        .checked_add(delivery_fee)
        .ok_or_else(|| MarketError::validation("order total is too large"))?;
    Ok(OrderPricing {
        subtotal,
        delivery_fee,
        group_discount,
        // discount <= subtotal
        total: gross - group_discount,
        group_id: group.map(|g| g.id),
    })
}

/// `group` is the record `request.group_id` resolved to.
pub fn build_order(
    cart: &Cart,
    request: CheckoutRequest,
    group: Option<&GroupOrder>,
    now: DateTime<Utc>,
    delivery_fee: Rupees,
) -> Result<OrderCreate, MarketError> {
    if cart.is_empty() {
        return Err(MarketError::validation("cart is empty"));
    }
    let today = now.date_naive();
    if request.delivery_date < today {
        return Err(MarketError::validation(format!(
            "delivery date {} is in the past (today is {today})",
            request.delivery_date
        )));
    }
    let address = request.delivery_address.trim();
    if address.is_empty() {
        return Err(MarketError::validation("a delivery address is required"));
    }
    if let Some(group) = group {
        if !group.is_active() {
            return Err(MarketError::validation(format!("{} is closed", group.id)));
        }
    }

    Ok(OrderCreate {
        vendor_id: cart.vendor_id,
        items: cart.lines.clone(),
        delivery_date: request.delivery_date,
        delivery_address: address.to_string(),
        pricing: price(cart.subtotal()?, delivery_fee, group)?,
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        GroupId, GroupStatus, Order, OrderId, OrderStatus, Product, ProductId, SupplierId,
        VendorId,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 8, 0, 0).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn product(id: u32, supplier: u32, price: Rupees) -> Product {
        Product {
            id: ProductId(id),
            supplier_id: SupplierId(supplier),
            supplier_name: format!("Supplier {supplier}"),
            name: format!("Item {id}"),
            category: "vegetables".into(),
            unit_price: price,
            unit: "kg".into(),
            stock: 500,
            description: String::new(),
        }
    }

    /// 10 kg tomatoes at 40 from supplier 1, 25 kg rice at 80 from supplier 2.
    fn two_supplier_cart() -> Cart {
        let mut cart = Cart::new(VendorId(1));
        cart.add_item(&product(1, 1, 40), 10).unwrap();
        cart.add_item(&product(2, 2, 80), 25).unwrap();
        cart
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            delivery_date: tomorrow(),
            delivery_address: "Stall 4, Dadar Market".into(),
            group_id: None,
        }
    }

    fn group(discount_percent: u8, status: GroupStatus) -> GroupOrder {
        GroupOrder {
            id: GroupId(3),
            name: "Dadar Vendors".into(),
            member_count: 12,
            total_amount: 25_000,
            discount_percent,
            status,
        }
    }

    #[test]
    fn tomatoes_and_rice_price_out() {
        let create = build_order(&two_supplier_cart(), request(), None, now(), 50).unwrap();
        assert_eq!(create.pricing.subtotal, 2400);
        assert_eq!(create.pricing.total, 2450);

        let order = Order::new(OrderId(1), create).unwrap();
        assert_eq!(order.partitions.len(), 2);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn active_group_discounts_the_full_subtotal() {
        let g = group(8, GroupStatus::Active);
        let create = build_order(&two_supplier_cart(), request(), Some(&g), now(), 50)
        .unwrap();
        assert_eq!(create.pricing.group_discount, 192);
        assert_eq!(create.pricing.total, 2400 + 50 - 192);
        assert_eq!(create.pricing.group_id, Some(GroupId(3)));
    }

    #[test]
    fn closed_group_is_rejected() {
        let g = group(8, GroupStatus::Closed);
        let err = build_order(&two_supplier_cart(), request(), Some(&g), now(), 50).unwrap_err();
        assert!(matches!(err, MarketError::Validation(_)));
    }

    #[test]
    fn preconditions_are_validation_errors() {
        let cart = two_supplier_cart();

        let empty = build_order(&Cart::new(VendorId(1)), request(), None, now(), 50);
        assert!(matches!(empty, Err(MarketError::Validation(_))));

        let mut past = request();
        past.delivery_date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert!(matches!(build_order(&cart, past, None, now(), 50), Err(MarketError::Validation(_))));

        let mut blank = request();
        blank.delivery_address = "   ".into();
        assert!(matches!(build_order(&cart, blank, None, now(), 50), Err(MarketError::Validation(_))));

        let mut today = request();
        today.delivery_date = now().date_naive();
        assert!(build_order(&cart, today, None, now(), 50).is_ok());
    }

    #[test]
    fn total_matches_formula_for_assorted_subtotals() {
        for (subtotal, percent) in [(0, 10), (1, 50), (999, 5), (2400, 0), (10_000, 100)] {
            let g = group(percent, GroupStatus::Active);
            let pricing = price(subtotal, 50, Some(&g)).unwrap();
            assert_eq!(
                pricing.total,
                subtotal + 50 - subtotal * Rupees::from(percent) / 100
            );
        }
    }

    #[test]
    fn total_beyond_rupees_range_is_validation() {
        assert!(matches!(
            price(Rupees::MAX - 10, 50, None),
            Err(MarketError::Validation(_))
        ));
        let pricing = price(Rupees::MAX - 50, 50, None).unwrap();
        assert_eq!(pricing.total, Rupees::MAX);
    }
}
