//! Payment callback processing

pub mod service;

pub use service::{CallbackOutcome, GatewayCallback, PaymentService};
