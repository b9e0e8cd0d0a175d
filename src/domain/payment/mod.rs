//! Payment aggregate
//!
//! One-to-one with an order; tracks the external bill and the gateway
//! callback outcome.

pub mod model;
pub mod repository;

pub use model::{Payment, PaymentStatus};
pub use repository::PaymentRepository;
