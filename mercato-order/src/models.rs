use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use mercato_shared::ids::{BookingId, OrderId, ProductId};

/// Attributes attached to the order/product relation itself, not to either
/// entity: whether the product's own discount applies within this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPivot {
    pub discount_enabled: bool,
}

/// An open order against which products can be booked.
///
/// The order's own discount-application lifecycle is managed elsewhere; this
/// type carries the resulting percentage as a plain value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Order-level discount percentage, absent when the order has none.
    pub discount: Option<Decimal>,
    products: HashMap<ProductId, OrderPivot>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(discount: Option<Decimal>) -> Self {
        Self {
            id: OrderId::new(),
            discount,
            products: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Put a product on the order, or update its pivot record.
    pub fn add_product(&mut self, product_id: ProductId, pivot: OrderPivot) {
        self.products.insert(product_id, pivot);
    }

    pub fn remove_product(&mut self, product_id: &ProductId) {
        self.products.remove(product_id);
    }

    pub fn has_product(&self, product_id: &ProductId) -> bool {
        self.products.contains_key(product_id)
    }

    /// Pivot record for a product on this order, as an owned copy.
    ///
    /// Returns `None` when the product is not part of the order. Callers get
    /// a fresh value each time; nothing on the order or the product is
    /// touched by the lookup.
    pub fn product_pivot(&self, product_id: &ProductId) -> Option<OrderPivot> {
        self.products.get(product_id).copied()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.products.keys()
    }
}

/// A single line item inside a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedProduct {
    pub product_id: ProductId,
    pub quantity: Decimal,
}

/// One customer's reservation of products within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub order_id: OrderId,
    pub products: Vec<BookedProduct>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            id: BookingId::new(),
            order_id,
            products: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn add_product(&mut self, product_id: ProductId, quantity: Decimal) {
        self.products.push(BookedProduct { product_id, quantity });
    }

    /// Total quantity booked for one product across this booking's lines.
    pub fn quantity_of(&self, product_id: &ProductId) -> Decimal {
        self.products
            .iter()
            .filter(|line| line.product_id == *product_id)
            .map(|line| line.quantity)
            .sum()
    }
}
