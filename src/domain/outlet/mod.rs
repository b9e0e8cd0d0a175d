//! Outlet aggregate
//!
//! A physical restaurant location with operating hours and a pax capacity
//! ceiling. Read-only to the booking flow.

pub mod model;
pub mod repository;

pub use model::Outlet;
pub use repository::OutletRepository;
