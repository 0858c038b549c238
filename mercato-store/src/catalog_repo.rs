use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use mercato_catalog::product::{Product, Variant};
use mercato_catalog::repository::{CatalogStore, StoreError};
use mercato_order::models::{BookedProduct, Booking};
use mercato_shared::ids::{
    BookingId, CategoryId, MeasureId, OrderId, ProductId, SupplierId, VariantId,
};

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(err))
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: Decimal,
    discount: Option<Decimal>,
    measure_id: Option<Uuid>,
    category_id: Uuid,
    supplier_id: String,
    max_available: Option<Decimal>,
    portion_quantity: Decimal,
    min_quantity: Decimal,
    max_quantity: Decimal,
    multiple: Decimal,
    transport: Decimal,
    variable: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            name: row.name,
            price: row.price,
            discount: row.discount,
            measure_id: row.measure_id.map(MeasureId),
            category_id: CategoryId(row.category_id),
            supplier_id: SupplierId(row.supplier_id),
            max_available: row.max_available,
            portion_quantity: row.portion_quantity,
            min_quantity: row.min_quantity,
            max_quantity: row.max_quantity,
            multiple: row.multiple,
            transport: row.transport,
            variable: row.variable,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    order_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BookedProductRow {
    product_id: String,
    quantity: Decimal,
}

#[derive(sqlx::FromRow)]
struct VariantRow {
    id: Uuid,
    product_id: String,
    name: String,
    values: Vec<String>,
}

const PRODUCT_COLUMNS: &str = "id, name, price, discount, measure_id, category_id, supplier_id, \
     max_available, portion_quantity, min_quantity, max_quantity, multiple, transport, variable, \
     created_at";

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Product::from))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, discount, measure_id, category_id, supplier_id,
                max_available, portion_quantity, min_quantity, max_quantity, multiple, transport,
                variable, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.discount)
        .bind(product.measure_id.map(|id| id.0))
        .bind(product.category_id.0)
        .bind(product.supplier_id.as_str())
        .bind(product.max_available)
        .bind(product.portion_quantity)
        .bind(product.min_quantity)
        .bind(product.max_quantity)
        .bind(product.multiple)
        .bind(product.transport)
        .bind(product.variable)
        .bind(product.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                if let sqlx::Error::Database(db) = &err {
                    // The primary key on products.id is the slug-race backstop.
                    if db.is_unique_violation() {
                        tracing::debug!(id = %product.id, "insert hit the identity constraint");
                        return Err(StoreError::Duplicate(product.id.clone()));
                    }
                }
                Err(backend(err))
            }
        }
    }

    async fn booked_quantity(
        &self,
        product_id: &ProductId,
        order_id: &OrderId,
    ) -> Result<Decimal, StoreError> {
        let total: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(bp.quantity)
            FROM booked_products bp
            JOIN bookings b ON b.id = bp.booking_id
            WHERE bp.product_id = $1 AND b.order_id = $2
            "#,
        )
        .bind(product_id.as_str())
        .bind(order_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn bookings_for_product(
        &self,
        product_id: &ProductId,
        order_id: &OrderId,
    ) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT b.id, b.order_id, b.created_at
            FROM bookings b
            WHERE b.order_id = $2
              AND EXISTS (
                SELECT 1 FROM booked_products bp
                WHERE bp.booking_id = b.id AND bp.product_id = $1
              )
            ORDER BY b.created_at
            "#,
        )
        .bind(product_id.as_str())
        .bind(order_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = sqlx::query_as::<_, BookedProductRow>(
                "SELECT product_id, quantity FROM booked_products WHERE booking_id = $1",
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

            bookings.push(Booking {
                id: BookingId(row.id),
                order_id: OrderId(row.order_id),
                products: lines
                    .into_iter()
                    .map(|line| BookedProduct {
                        product_id: ProductId(line.product_id),
                        quantity: line.quantity,
                    })
                    .collect(),
                created_at: row.created_at,
            });
        }

        Ok(bookings)
    }

    async fn variants_of(&self, product_id: &ProductId) -> Result<Vec<Variant>, StoreError> {
        let rows = sqlx::query_as::<_, VariantRow>(
            r#"SELECT id, product_id, name, "values" FROM variants WHERE product_id = $1 ORDER BY name"#,
        )
        .bind(product_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|row| Variant {
                id: VariantId(row.id),
                product_id: ProductId(row.product_id),
                name: row.name,
                values: row.values,
            })
            .collect())
    }
}
