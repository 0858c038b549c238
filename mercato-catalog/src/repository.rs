use async_trait::async_trait;
use rust_decimal::Decimal;

use mercato_order::models::Booking;
use mercato_shared::ids::{OrderId, ProductId};

use crate::product::{Product, Variant};

/// Errors surfaced by datastore implementations. Backend failures are
/// propagated unmodified; this core never swallows them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate product identifier: {0}")]
    Duplicate(ProductId),

    #[error("datastore backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Datastore collaborator for catalog reads and product creation.
///
/// Persistence and general querying live elsewhere; this trait only carries
/// what the catalog core consumes: identity lookup for slug allocation,
/// insertion (with the storage uniqueness constraint mapped to
/// [`StoreError::Duplicate`]), and the booking aggregations.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a new product. Fails with [`StoreError::Duplicate`] when the
    /// identity is already taken, the backstop for the slug-allocation race.
    async fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    /// Sum of booked line-item quantities for a product, restricted to the
    /// bookings of one order.
    async fn booked_quantity(
        &self,
        product_id: &ProductId,
        order_id: &OrderId,
    ) -> Result<Decimal, StoreError>;

    /// The order's bookings that contain the given product.
    async fn bookings_for_product(
        &self,
        product_id: &ProductId,
        order_id: &OrderId,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Variants of a product, ordered by name.
    async fn variants_of(&self, product_id: &ProductId) -> Result<Vec<Variant>, StoreError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-test store double backed by plain maps.
    pub struct FixtureStore {
        products: Mutex<HashMap<ProductId, Product>>,
        bookings: Mutex<Vec<Booking>>,
        variants: Mutex<Vec<Variant>>,
    }

    impl FixtureStore {
        pub fn new() -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
                bookings: Mutex::new(Vec::new()),
                variants: Mutex::new(Vec::new()),
            }
        }

        pub fn add_product(&self, product: Product) {
            self.products.lock().unwrap().insert(product.id.clone(), product);
        }

        pub fn add_booking(&self, booking: Booking) {
            self.bookings.lock().unwrap().push(booking);
        }

        pub fn add_variant(&self, variant: Variant) {
            self.variants.lock().unwrap().push(variant);
        }
    }

    #[async_trait]
    impl CatalogStore for FixtureStore {
        async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
            Ok(self.products.lock().unwrap().get(id).cloned())
        }

        async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
            let mut products = self.products.lock().unwrap();
            if products.contains_key(&product.id) {
                return Err(StoreError::Duplicate(product.id.clone()));
            }
            products.insert(product.id.clone(), product.clone());
            Ok(())
        }

        async fn booked_quantity(
            &self,
            product_id: &ProductId,
            order_id: &OrderId,
        ) -> Result<Decimal, StoreError> {
            let total = self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|booking| booking.order_id == *order_id)
                .map(|booking| booking.quantity_of(product_id))
                .sum();
            Ok(total)
        }

        async fn bookings_for_product(
            &self,
            product_id: &ProductId,
            order_id: &OrderId,
        ) -> Result<Vec<Booking>, StoreError> {
            let bookings = self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|booking| {
                    booking.order_id == *order_id
                        && booking.products.iter().any(|line| line.product_id == *product_id)
                })
                .cloned()
                .collect();
            Ok(bookings)
        }

        async fn variants_of(&self, product_id: &ProductId) -> Result<Vec<Variant>, StoreError> {
            let mut variants: Vec<Variant> = self
                .variants
                .lock()
                .unwrap()
                .iter()
                .filter(|variant| variant.product_id == *product_id)
                .cloned()
                .collect();
            variants.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(variants)
        }
    }
}
