//! Order aggregate
//!
//! The central transactional entity. Orders are created only by the booking
//! coordinator inside its serializable transaction; status transitions are
//! driven by the payment callback or explicit cancellation.

pub mod model;
pub mod repository;

pub use model::{
    generate_order_no, ChosenCustomization, FulfillmentType, Order, OrderLine, OrderStatus,
};
pub use repository::OrderRepository;
