pub mod models;

pub use models::{BookedProduct, Booking, Order, OrderPivot};
