//! Business logic, use cases and background tasks

pub mod booking;
pub mod cleanup;
pub mod payments;
pub mod ports;

pub use booking::{AvailabilityService, BookingService};
pub use cleanup::start_cleanup_task;
pub use payments::PaymentService;
