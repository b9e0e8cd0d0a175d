//! Payment gateway adapters

pub mod toyyibpay;

pub use toyyibpay::ToyyibPayGateway;
