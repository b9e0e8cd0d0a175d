//! Table aggregate
//!
//! Legacy table-based dine-in seating. Superseded by pax-based booking but
//! still surfaced by the availability listing.

pub mod model;
pub mod repository;

pub use model::{Table, TableStatus};
pub use repository::TableRepository;
