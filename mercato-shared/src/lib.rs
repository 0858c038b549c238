pub mod ids;
pub mod money;

pub use ids::{BookingId, CategoryId, MeasureId, OrderId, ProductId, SupplierId, VariantId};
pub use money::apply_percentage;
