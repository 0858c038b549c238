use rust_decimal::Decimal;

use mercato_order::models::{Booking, Order};

use crate::product::Product;
use crate::repository::{CatalogStore, StoreError};

impl Product {
    /// Remaining bookable quantity for this product within an order.
    ///
    /// `None` when no cap is configured: there is nothing to compute and the
    /// datastore is not consulted. Otherwise the booked line-item quantities
    /// of the order are summed, normalized from portion counts into raw
    /// measure units when the product is portioned, and subtracted from the
    /// cap. The result is not clamped: a negative remainder means the order
    /// is overbooked and is meaningful to callers.
    pub async fn still_available(
        &self,
        store: &dyn CatalogStore,
        order: &Order,
    ) -> Result<Option<Decimal>, StoreError> {
        let Some(cap) = self.max_available else {
            return Ok(None);
        };

        let mut quantity = store.booked_quantity(&self.id, &order.id).await?;
        if !self.portion_quantity.is_zero() {
            quantity *= self.portion_quantity;
        }

        Ok(Some(cap - quantity))
    }

    /// The order's bookings containing this product.
    pub async fn bookings_in_order(
        &self,
        store: &dyn CatalogStore,
        order: &Order,
    ) -> Result<Vec<Booking>, StoreError> {
        store.bookings_for_product(&self.id, &order.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductDraft;
    use crate::repository::testing::FixtureStore;
    use mercato_shared::ids::{CategoryId, ProductId, SupplierId};
    use rust_decimal_macros::dec;

    fn capped_product(cap: Option<Decimal>, portion: Decimal) -> Product {
        let mut draft =
            ProductDraft::new(SupplierId::from("S1"), CategoryId::new(), "Flour", dec!(2.00));
        draft.max_available = cap;
        draft.portion_quantity = portion;
        draft.into_product(ProductId::from("S1::flour"))
    }

    fn booked(store: &FixtureStore, order: &Order, product: &Product, quantities: &[Decimal]) {
        for quantity in quantities {
            let mut booking = Booking::new(order.id);
            booking.add_product(product.id.clone(), *quantity);
            store.add_booking(booking);
        }
    }

    #[tokio::test]
    async fn uncapped_product_has_no_availability_figure() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(None, Decimal::ZERO);
        booked(&store, &order, &product, &[dec!(4)]);

        assert_eq!(product.still_available(&store, &order).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remaining_is_cap_minus_booked() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(Some(dec!(10)), Decimal::ZERO);
        booked(&store, &order, &product, &[dec!(1), dec!(3)]);

        assert_eq!(
            product.still_available(&store, &order).await.unwrap(),
            Some(dec!(6))
        );
    }

    #[tokio::test]
    async fn portioned_bookings_count_in_raw_units() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(Some(dec!(10)), dec!(2));
        booked(&store, &order, &product, &[dec!(3)]);

        // 3 portions of 2 raw units each
        assert_eq!(
            product.still_available(&store, &order).await.unwrap(),
            Some(dec!(4))
        );
    }

    #[tokio::test]
    async fn other_orders_do_not_count() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let other = Order::new(None);
        let product = capped_product(Some(dec!(10)), Decimal::ZERO);
        booked(&store, &other, &product, &[dec!(9)]);
        booked(&store, &order, &product, &[dec!(4)]);

        assert_eq!(
            product.still_available(&store, &order).await.unwrap(),
            Some(dec!(6))
        );
    }

    #[tokio::test]
    async fn overbooking_yields_a_negative_remainder() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(Some(dec!(10)), Decimal::ZERO);
        booked(&store, &order, &product, &[dec!(12)]);

        assert_eq!(
            product.still_available(&store, &order).await.unwrap(),
            Some(dec!(-2))
        );
    }

    #[tokio::test]
    async fn zero_cap_is_a_real_zero_stock() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(Some(Decimal::ZERO), Decimal::ZERO);

        assert_eq!(
            product.still_available(&store, &order).await.unwrap(),
            Some(Decimal::ZERO)
        );
    }

    #[tokio::test]
    async fn lists_only_bookings_containing_the_product() {
        let store = FixtureStore::new();
        let order = Order::new(None);
        let product = capped_product(Some(dec!(10)), Decimal::ZERO);
        let unrelated = ProductId::from("S2::milk");

        let mut with_product = Booking::new(order.id);
        with_product.add_product(product.id.clone(), dec!(2));
        store.add_booking(with_product);

        let mut without_product = Booking::new(order.id);
        without_product.add_product(unrelated, dec!(1));
        store.add_booking(without_product);

        let bookings = product.bookings_in_order(&store, &order).await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].quantity_of(&product.id), dec!(2));
    }
}
