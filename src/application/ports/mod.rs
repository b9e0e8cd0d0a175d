//! Application ports

pub mod outbound;

pub use outbound::{BillRequest, CreatedBill, Notifier, PaymentGateway};
