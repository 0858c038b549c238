use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercato_shared::ids::{CategoryId, MeasureId, ProductId, SupplierId, VariantId};

/// A catalog entry: something a supplier sells, measured in a unit, bookable
/// into orders under quantity and discount rules.
///
/// Identity is assigned exactly once, at creation (see [`crate::slug`]), and
/// never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Reference unit price.
    pub price: Decimal,
    /// Product-level discount percentage; only applied within orders that
    /// enable it on their pivot record.
    pub discount: Option<Decimal>,
    pub measure_id: Option<MeasureId>,
    pub category_id: CategoryId,
    pub supplier_id: SupplierId,
    /// Bookable cap, in raw measure units. `None` means no cap is
    /// configured and availability is never computed.
    pub max_available: Option<Decimal>,
    /// Size of one sellable portion in raw measure units; zero when the
    /// product is sold directly in measure units.
    pub portion_quantity: Decimal,
    pub min_quantity: Decimal,
    pub max_quantity: Decimal,
    /// Ordering increment; quantities are expected in multiples of this.
    pub multiple: Decimal,
    /// Flat transport surcharge per unit.
    pub transport: Decimal,
    /// Price may fluctuate at delivery time.
    pub variable: bool,
    pub created_at: DateTime<Utc>,
}

/// A product waiting for identity assignment, as handed to
/// [`crate::slug::create_product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub discount: Option<Decimal>,
    pub measure_id: Option<MeasureId>,
    pub category_id: CategoryId,
    pub supplier_id: SupplierId,
    pub max_available: Option<Decimal>,
    pub portion_quantity: Decimal,
    pub min_quantity: Decimal,
    pub max_quantity: Decimal,
    pub multiple: Decimal,
    pub transport: Decimal,
    pub variable: bool,
}

impl ProductDraft {
    pub fn new(
        supplier_id: SupplierId,
        category_id: CategoryId,
        name: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            discount: None,
            measure_id: None,
            category_id,
            supplier_id,
            max_available: None,
            portion_quantity: Decimal::ZERO,
            min_quantity: Decimal::ZERO,
            max_quantity: Decimal::ZERO,
            multiple: Decimal::ZERO,
            transport: Decimal::ZERO,
            variable: false,
        }
    }

    pub(crate) fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            discount: self.discount,
            measure_id: self.measure_id,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            max_available: self.max_available,
            portion_quantity: self.portion_quantity,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            multiple: self.multiple,
            transport: self.transport,
            variable: self.variable,
            created_at: Utc::now(),
        }
    }
}

/// Measure unit a product is sold in (kilograms, litres, pieces, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub id: MeasureId,
    pub name: String,
}

impl Measure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MeasureId::new(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
}

/// A named variation of a product (size, packaging, ...) with its possible
/// values. Managed by the catalog CRUD, listed here ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub name: String,
    pub values: Vec<String>,
}
