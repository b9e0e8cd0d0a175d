//! Core business entities, types and traits

pub mod booking_date;
pub mod error;
pub mod menu;
pub mod order;
pub mod outlet;
pub mod payment;
pub mod repositories;
pub mod table;
pub mod time_slot;

// Re-export commonly used types
pub use booking_date::MAX_BOOKING_DAYS_AHEAD;
pub use error::{DomainError, DomainResult};
pub use menu::{CustomizationGroup, CustomizationOption, CustomizationSchema, MenuItem};
pub use order::{
    generate_order_no, ChosenCustomization, FulfillmentType, Order, OrderLine, OrderStatus,
};
pub use outlet::Outlet;
pub use payment::{Payment, PaymentStatus};
pub use repositories::RepositoryProvider;
pub use table::{Table, TableStatus};
pub use time_slot::TimeSlot;
