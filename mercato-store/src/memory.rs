use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;

use mercato_catalog::product::{Product, Variant};
use mercato_catalog::repository::{CatalogStore, StoreError};
use mercato_order::models::Booking;
use mercato_shared::ids::{OrderId, ProductId};

/// In-memory datastore, used by fixtures and tests.
pub struct MemoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    bookings: RwLock<Vec<Booking>>,
    variants: RwLock<Vec<Variant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            bookings: RwLock::new(Vec::new()),
            variants: RwLock::new(Vec::new()),
        }
    }

    pub async fn add_booking(&self, booking: Booking) {
        self.bookings.write().await.push(booking);
    }

    pub async fn add_variant(&self, variant: Variant) {
        self.variants.write().await.push(variant);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.write().await;
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
            .read()
            .await
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
            .read()
            .await
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
            .read()
            .await
            .iter()
            .filter(|variant| variant.product_id == *product_id)
            .cloned()
            .collect();
        variants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_catalog::product::ProductDraft;
    use mercato_catalog::slug::create_product;
    use mercato_order::models::Order;
    use mercato_shared::ids::{CategoryId, SupplierId, VariantId};
    use rust_decimal_macros::dec;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft::new(SupplierId::from("S1"), CategoryId::new(), name, dec!(3.00))
    }

    #[tokio::test]
    async fn creation_suffixes_identifiers_through_the_store() {
        let store = MemoryStore::new();

        let first = create_product(&store, draft("Widget")).await.unwrap();
        let second = create_product(&store, draft("Widget")).await.unwrap();
        let third = create_product(&store, draft("Widget")).await.unwrap();

        assert_eq!(first.id, ProductId::from("S1::widget"));
        assert_eq!(second.id, ProductId::from("S1::widget_1"));
        assert_eq!(third.id, ProductId::from("S1::widget_2"));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        let product = create_product(&store, draft("Widget")).await.unwrap();

        let err = store.insert_product(&product).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == product.id));
    }

    #[tokio::test]
    async fn booked_quantity_is_scoped_to_the_order() {
        let store = MemoryStore::new();
        let product = create_product(&store, draft("Flour")).await.unwrap();
        let order = Order::new(None);
        let other = Order::new(None);

        let mut booking = Booking::new(order.id);
        booking.add_product(product.id.clone(), dec!(1.5));
        booking.add_product(product.id.clone(), dec!(2.5));
        store.add_booking(booking).await;

        let mut elsewhere = Booking::new(other.id);
        elsewhere.add_product(product.id.clone(), dec!(7));
        store.add_booking(elsewhere).await;

        assert_eq!(
            store.booked_quantity(&product.id, &order.id).await.unwrap(),
            dec!(4.0)
        );
    }

    #[tokio::test]
    async fn variants_come_back_ordered_by_name() {
        let store = MemoryStore::new();
        let product = create_product(&store, draft("Cheese")).await.unwrap();

        for name in ["Stagionatura", "Peso", "Formato"] {
            store
                .add_variant(Variant {
                    id: VariantId::new(),
                    product_id: product.id.clone(),
                    name: name.to_string(),
                    values: Vec::new(),
                })
                .await;
        }

        let names: Vec<String> = store
            .variants_of(&product.id)
            .await
            .unwrap()
            .into_iter()
            .map(|variant| variant.name)
            .collect();
        assert_eq!(names, ["Formato", "Peso", "Stagionatura"]);
    }
}
