use rust_decimal::Decimal;

use mercato_order::models::Order;
use mercato_shared::money::apply_percentage;

use crate::product::Product;

impl Product {
    /// Reference price with only the product's own discount applied,
    /// ignoring any order context.
    pub fn discount_price(&self) -> Decimal {
        apply_percentage(self.price, self.discount)
    }

    /// Price of this product within an order.
    ///
    /// The product's own discount applies only when the order carries the
    /// product with `discount_enabled` on its pivot record; the order-level
    /// discount then applies on top of either outcome. With `rectify`,
    /// portioned products return the total price of one portion instead of
    /// the per-raw-unit price; pass `false` when portion normalization is
    /// handled by the caller (e.g. per-unit display).
    ///
    /// Pure over its inputs: nothing is mutated and nothing is cached, so
    /// repeated calls reflect the order context freshly each time.
    pub fn contextual_price(&self, order: &Order, rectify: bool) -> Decimal {
        let discount_enabled = order
            .product_pivot(&self.id)
            .map(|pivot| pivot.discount_enabled)
            .unwrap_or(false);

        let price = if discount_enabled {
            apply_percentage(self.price, self.discount)
        } else {
            self.price
        };

        let price = apply_percentage(price, order.discount);

        if rectify && !self.portion_quantity.is_zero() {
            price * self.portion_quantity
        } else {
            price
        }
    }
}
