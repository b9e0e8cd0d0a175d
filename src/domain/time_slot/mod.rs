//! Time slot aggregate
//!
//! A bookable time-of-day bucket scoped to one outlet. Capacity is always
//! derived from order rows; slots carry only the takeaway ceiling.

pub mod model;
pub mod repository;

pub use model::TimeSlot;
pub use repository::TimeSlotRepository;
